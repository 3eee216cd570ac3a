//! In-memory storage implementation

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// Expense history and balances guarded by one lock
#[derive(Debug, Default)]
struct LedgerState {
    expenses: Vec<Expense>,
    balances: BalanceMap,
}

/// In-memory storage for a single process.
///
/// Clones share the same state, so one storage can back several ledgers or
/// request handlers.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    state: Arc<RwLock<LedgerState>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::default())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        let mut state = self.write_state()?;
        state.expenses.clear();
        state.balances.clear();
        Ok(())
    }

    fn read_state(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|_| LedgerError::Storage("ledger state lock poisoned".to_string()))
    }

    fn write_state(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|_| LedgerError::Storage("ledger state lock poisoned".to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn record_expense(&self, expense: &Expense, deltas: &BalanceMap) -> LedgerResult<()> {
        let mut state = self.write_state()?;
        state.expenses.push(expense.clone());
        for (person, delta) in deltas {
            *state.balances.entry(person.clone()).or_default() += delta;
        }
        Ok(())
    }

    async fn get_expense(&self, expense_id: &Uuid) -> LedgerResult<Option<Expense>> {
        Ok(self
            .read_state()?
            .expenses
            .iter()
            .find(|expense| expense.id == *expense_id)
            .cloned())
    }

    async fn list_expenses(&self) -> LedgerResult<Vec<Expense>> {
        Ok(self.read_state()?.expenses.clone())
    }

    async fn get_balances(&self) -> LedgerResult<BalanceMap> {
        Ok(self.read_state()?.balances.clone())
    }

    async fn update_balances<F, R>(&self, f: F) -> LedgerResult<R>
    where
        F: FnOnce(&mut BalanceMap) -> R + Send,
        R: Send,
    {
        let mut state = self.write_state()?;
        Ok(f(&mut state.balances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn expense(payer: &str) -> Expense {
        Expense::new(
            payer.to_string(),
            BigDecimal::from(10),
            vec![payer.to_string()],
            SplitMethod::Equal,
            SplitDetails::new(),
            ShareMap::new(),
        )
    }

    #[tokio::test]
    async fn test_record_expense_applies_deltas() {
        let storage = MemoryStorage::new();
        let mut deltas = BalanceMap::new();
        deltas.insert("A".to_string(), BigDecimal::from(10));
        deltas.insert("B".to_string(), BigDecimal::from(-10));

        let first = expense("A");
        storage.record_expense(&first, &deltas).await.unwrap();
        storage.record_expense(&expense("A"), &deltas).await.unwrap();

        let balances = storage.get_balances().await.unwrap();
        assert_eq!(balances["A"], BigDecimal::from(20));
        assert_eq!(balances["B"], BigDecimal::from(-20));
        assert_eq!(storage.list_expenses().await.unwrap().len(), 2);
        assert_eq!(
            storage.get_expense(&first.id).await.unwrap(),
            Some(first.clone())
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage
            .record_expense(&expense("A"), &BalanceMap::new())
            .await
            .unwrap();

        assert_eq!(other.list_expenses().await.unwrap().len(), 1);

        other.clear().unwrap();
        assert!(storage.list_expenses().await.unwrap().is_empty());
    }
}
