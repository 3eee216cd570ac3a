//! # Expense Ledger
//!
//! Shared expense tracking for a group of people: record who paid for what,
//! keep everyone's net balance, and work out who should pay whom to settle up.
//!
//! ## Features
//!
//! - **Split methods**: equal, exact amounts, percentages and share weights
//! - **Net balances**: every expense credits the payer and debits each share,
//!   so balances always sum to zero
//! - **Settle-up**: greedy debtor/creditor matching that zeroes balances
//! - **Storage abstraction**: trait-based storage with an in-memory backend
//!   that applies each change as one critical section
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use expense_ledger::{ExpenseBuilder, Ledger, LedgerError, MemoryStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LedgerError> {
//!     let ledger = Ledger::new(MemoryStorage::new());
//!
//!     let dinner = ExpenseBuilder::new("Alice", BigDecimal::from(120))
//!         .participants(["Alice", "Bob", "Carol"])
//!         .build()?;
//!     ledger.apply(dinner).await?;
//!
//!     for payment in ledger.compute_settlements().await? {
//!         println!("{}", payment); // Bob pays Alice 40.00, Carol pays Alice 40.00
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ledger;
pub mod settlement;
pub mod split;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use settlement::*;
pub use split::*;
pub use traits::*;
pub use types::*;
pub use utils::MemoryStorage;
