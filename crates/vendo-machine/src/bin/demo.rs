//! # Machine Session Walkthrough
//!
//! Builds a special vending machine, stocks it, and runs a scripted
//! afternoon of purchases end to end. The fastest way to see the whole
//! workspace working without a presentation layer.
//!
//! ## Usage
//! ```bash
//! cargo run -p vendo-machine --bin demo
//!
//! # Verbose till logging
//! RUST_LOG=debug cargo run -p vendo-machine --bin demo
//! ```

use tracing_subscriber::EnvFilter;

use vendo_core::{Denomination, Money, Product};
use vendo_machine::{MachineConfig, Tender, VendingMachine, STANDARD_STAPLES};

/// The shelf this demo stocks: fruits for the combo plus one packaged item.
const SHELF: &[(usize, &str, i64, i64, i64)] = &[
    // (slot, name, price in pesos, calories, stock)
    (0, "Banana", 35, 105, 8),
    (1, "Grapes", 60, 62, 6),
    (2, "Apple", 25, 95, 10),
    (3, "Melon", 45, 64, 5),
    (4, "Pear", 30, 101, 7),
    (5, "Watermelon", 50, 86, 4),
    (7, "Choco Bar", 55, 230, 10),
];

/// Opening float: small coins only, the way a fresh till starts the day.
const FLOAT: &[(Denomination, u32)] = &[
    (Denomination::One, 5),
    (Denomination::Five, 5),
    (Denomination::Ten, 5),
    (Denomination::Twenty, 5),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("Vendo Machine Walkthrough");
    println!("=========================");

    let config = MachineConfig::load_or_default(None);
    let mut machine = VendingMachine::special(&config, Money::from_pesos(95));

    // Stock the shelf
    for &(slot, name, price, calories, stock) in SHELF {
        machine
            .slots_mut()
            .install(slot, Product::new(name, Money::from_pesos(price), calories), stock)?;
    }

    // Fill the pantry so the combo is on the menu
    if let Some(pantry) = machine.pantry_mut() {
        for staple in STANDARD_STAPLES {
            pantry.replenish(staple, 10)?;
        }
    }

    // Seed the till float
    for &(denomination, count) in FLOAT {
        machine.till_mut().replenish(denomination, count);
    }

    println!("✓ Machine stocked");
    println!("  Till float: {}", machine.till().total_value());
    println!();

    // -------------------------------------------------------------------------
    // Purchase 1: two bananas, paid with a ₱100 bill
    // -------------------------------------------------------------------------
    let order = machine.quote(0, 2)?;
    let mut tender = Tender::new();
    tender.insert_pesos(100)?;

    let receipt = machine.commit(&order, &tender)?;
    println!("Receipt {}", receipt.number);
    println!("  {} x{} = {}", receipt.product_name, receipt.quantity, receipt.total);
    println!("  Tendered {}, change {}", receipt.tendered, receipt.change);
    if !receipt.change_breakdown.is_empty() {
        println!("  Change breakdown:");
        for (denomination, count) in receipt.change_breakdown.iter() {
            println!("    {} x {}", count, denomination);
        }
    }
    println!();

    // -------------------------------------------------------------------------
    // Purchase 2: a fruit salad with cheese, paid ₱100 + ₱20 + ₱5
    // -------------------------------------------------------------------------
    let order = machine.quote_combo(&[0, 2, 4], true)?;
    let mut tender = Tender::new();
    for pesos in [100, 20, 5] {
        tender.insert_pesos(pesos)?;
    }
    println!(
        "Combo: {} for {} (balance after coins: {})",
        order.product_name,
        order.total(),
        tender.balance_due(order.total())
    );

    let receipt = machine.commit(&order, &tender)?;
    println!("Receipt {}", receipt.number);
    println!("  Tendered {}, change {}", receipt.tendered, receipt.change);
    println!();

    // -------------------------------------------------------------------------
    // Purchase 3: an aborted transaction (the till cannot change a ₱1000 bill)
    // -------------------------------------------------------------------------
    let order = machine.quote(7, 1)?; // ₱55 Choco Bar
    let mut tender = Tender::new();
    tender.insert_pesos(1000)?;

    match machine.commit(&order, &tender) {
        Ok(_) => println!("unexpected: the till changed a ₱1000 bill"),
        Err(err) => {
            println!("Aborted purchase: {}", err);
            println!("  Refunding the customer {}", tender.total());
        }
    }
    println!();

    // -------------------------------------------------------------------------
    // End of shift: collect sales, print the summary
    // -------------------------------------------------------------------------
    let collection = machine.collect_sales();
    println!("Collected {}", collection.amount);
    if collection.shortfall.is_positive() {
        println!("  ⚠ till shortfall: {}", collection.shortfall);
    }
    println!();

    let summary = machine.sales_summary();
    println!("Sales summary:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show till mutations
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
