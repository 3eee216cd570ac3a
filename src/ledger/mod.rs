//! Ledger module containing expense recording and balance management

pub mod balance;
pub mod core;
pub mod expense;

pub use balance::*;
pub use core::*;
pub use expense::*;
