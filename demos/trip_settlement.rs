//! Weekend trip example: record a few shared bills and settle up

use bigdecimal::BigDecimal;
use expense_ledger::utils::parse_split_details;
use expense_ledger::{ExpenseBuilder, ExpenseDraft, Ledger, LedgerConfig, MemoryStorage, SplitMethod};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🧾 Expense Ledger - Weekend Trip Example\n");

    let ledger = Ledger::with_config(MemoryStorage::new(), LedgerConfig::default())?;
    let config = ledger.config().clone();

    // 1. Cabin rent, split equally
    let cabin = ExpenseBuilder::new("Alice", BigDecimal::from(450))
        .participants(["Alice", "Bob", "Carol"])
        .build()?;
    ledger.apply(cabin).await?;
    println!("  ✓ Alice paid 450.00 for the cabin (equal split)");

    // 2. Groceries, exact amounts typed in the client's Name:Amount format
    let mut groceries = ExpenseDraft::new(
        "Bob".to_string(),
        BigDecimal::from_str("96.40")?,
        vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
        SplitMethod::Exact.to_string(),
    );
    groceries.split_details = parse_split_details("Alice:30.00\nBob:40.40\nCarol:26.00")?;
    ledger.apply(groceries).await?;
    println!("  ✓ Bob paid 96.40 for groceries (exact split)");

    // 3. Fuel, by share weight: Carol drove the extra leg
    let fuel = ExpenseBuilder::new("Carol", BigDecimal::from(80))
        .split(SplitMethod::Shares)
        .participant_with("Alice", BigDecimal::from(1))
        .participant_with("Bob", BigDecimal::from(1))
        .participant_with("Carol", BigDecimal::from(2))
        .build()?;
    ledger.apply(fuel).await?;
    println!("  ✓ Carol paid 80.00 for fuel (shares split)\n");

    // 4. A bad entry is rejected and changes nothing
    let bad = ExpenseBuilder::new("Alice", BigDecimal::from(50))
        .split(SplitMethod::Percentage)
        .participant_with("Alice", BigDecimal::from(50))
        .participant_with("Bob", BigDecimal::from(40))
        .build()?;
    if let Err(err) = ledger.apply(bad).await {
        println!("  ✗ Rejected expense: {}\n", err);
    }

    println!("📊 Balances:");
    for (person, balance) in ledger.current_balances().await? {
        println!("  {:<6} {:>10}", person, config.display_amount(&balance));
    }
    println!();

    println!("💸 Settle up:");
    for payment in ledger.compute_settlements().await? {
        println!("  {}", config.describe(&payment));
    }
    println!();

    let report = ledger.validate_integrity().await?;
    println!(
        "✅ {} expenses, {} spent, {} people still owing or owed",
        report.expense_count,
        config.display_amount(&report.total_spent),
        report.outstanding_people
    );

    Ok(())
}
