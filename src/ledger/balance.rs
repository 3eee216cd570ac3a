//! Balance tracking and settle-up

use bigdecimal::BigDecimal;

use crate::settlement::SettlementPlanner;
use crate::traits::*;
use crate::types::*;

/// Balance changes caused by one expense.
///
/// The payer is credited the total and every share holder is debited their
/// share. A payer who is also a participant gets both adjustments.
pub fn balance_deltas(payer: &str, total: &BigDecimal, shares: &ShareMap) -> BalanceMap {
    let mut deltas = BalanceMap::new();
    *deltas.entry(payer.to_string()).or_default() += total;
    for (person, share) in shares {
        *deltas.entry(person.clone()).or_default() -= share;
    }
    deltas
}

/// Balance manager for reading balances and settling them
pub struct BalanceManager<S: LedgerStorage> {
    pub(crate) storage: S,
    planner: SettlementPlanner,
}

impl<S: LedgerStorage> BalanceManager<S> {
    /// Create a new balance manager
    pub fn new(storage: S, planner: SettlementPlanner) -> Self {
        Self { storage, planner }
    }

    /// Snapshot of every person's net balance
    pub async fn current_balances(&self) -> LedgerResult<BalanceMap> {
        self.storage.get_balances().await
    }

    /// Net balance of one person, zero if they never appeared
    pub async fn balance_of(&self, person: &str) -> LedgerResult<BigDecimal> {
        Ok(self
            .storage
            .get_balances()
            .await?
            .remove(person)
            .unwrap_or_default())
    }

    /// Compute settlements and apply them to the live balances
    pub async fn settle_up(&self) -> LedgerResult<Vec<Transaction>> {
        let planner = &self.planner;
        let transactions = self
            .storage
            .update_balances(|balances| planner.settle(balances))
            .await?;

        tracing::info!(transactions = transactions.len(), "settled balances");
        Ok(transactions)
    }

    /// Compute settlements against a snapshot, leaving balances untouched
    pub async fn preview_settlements(&self) -> LedgerResult<Vec<Transaction>> {
        let balances = self.storage.get_balances().await?;
        Ok(self.planner.plan(&balances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_deltas_payer_participates() {
        let mut shares = ShareMap::new();
        shares.insert("Alice".to_string(), BigDecimal::from(40));
        shares.insert("Bob".to_string(), BigDecimal::from(60));

        let deltas = balance_deltas("Alice", &BigDecimal::from(100), &shares);

        assert_eq!(deltas["Alice"], BigDecimal::from(60));
        assert_eq!(deltas["Bob"], BigDecimal::from(-60));
        let sum: BigDecimal = deltas.values().sum();
        assert_eq!(sum, BigDecimal::from(0));
    }

    #[test]
    fn test_balance_deltas_payer_outside_split() {
        let mut shares = ShareMap::new();
        shares.insert("Bob".to_string(), BigDecimal::from(25));
        shares.insert("Carol".to_string(), BigDecimal::from(25));

        let deltas = balance_deltas("Alice", &BigDecimal::from(50), &shares);

        assert_eq!(deltas["Alice"], BigDecimal::from(50));
        assert_eq!(deltas["Bob"], BigDecimal::from(-25));
        assert_eq!(deltas["Carol"], BigDecimal::from(-25));
    }
}
