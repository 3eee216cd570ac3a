//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::types::*;

/// Storage abstraction for the expense ledger
///
/// Implementations own the expense history and the balance map together and
/// must make each mutating method a single critical section: no reader may
/// observe an expense without its balance changes, or a half-applied
/// settlement.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Append an expense and add `deltas` to the balances, atomically
    async fn record_expense(&self, expense: &Expense, deltas: &BalanceMap) -> LedgerResult<()>;

    /// Get an expense by ID
    async fn get_expense(&self, expense_id: &Uuid) -> LedgerResult<Option<Expense>>;

    /// List all expenses in the order they were recorded
    async fn list_expenses(&self) -> LedgerResult<Vec<Expense>>;

    /// Snapshot of the current balances
    async fn get_balances(&self) -> LedgerResult<BalanceMap>;

    /// Run `f` against the live balances while holding exclusive access
    async fn update_balances<F, R>(&self, f: F) -> LedgerResult<R>
    where
        F: FnOnce(&mut BalanceMap) -> R + Send,
        R: Send;
}

/// Trait for implementing custom expense validation rules
pub trait ExpenseValidator: Send + Sync {
    /// Validate a normalized draft before its shares are computed
    fn validate_expense(&self, draft: &ExpenseDraft) -> LedgerResult<()>;
}

/// Default expense validator: payer, participants and a positive total
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, draft: &ExpenseDraft) -> LedgerResult<()> {
        if draft.payer.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Payer cannot be empty".to_string(),
            ));
        }

        if draft.participants.is_empty() {
            return Err(LedgerError::InvalidInput(
                "Participants cannot be empty".to_string(),
            ));
        }

        if draft.total <= BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Total must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
