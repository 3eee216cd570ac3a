//! Settle-up planning: greedy matching of debtors against creditors

use bigdecimal::BigDecimal;

use crate::config::default_tolerance;
use crate::types::*;

/// Person with an outstanding magnitude still to be matched
#[derive(Debug, Clone)]
struct Position {
    person: String,
    remaining: BigDecimal,
}

/// Greedy settlement planner.
///
/// Debtors and creditors are each sorted once by descending magnitude and
/// walked with two cursors. Lists are not re-sorted as balances shrink, so the
/// plan is deterministic and linear but not guaranteed to use the fewest
/// possible transactions.
#[derive(Debug, Clone)]
pub struct SettlementPlanner {
    tolerance: BigDecimal,
}

impl SettlementPlanner {
    /// Create a new planner with the given zero tolerance
    pub fn new(tolerance: BigDecimal) -> Self {
        Self { tolerance }
    }

    /// Plan settlements and apply them to `balances`.
    ///
    /// Every emitted transaction is subtracted from the creditor and added to
    /// the debtor in the map, so afterwards the involved balances are
    /// (effectively) zero. Run it on a copy to get a dry-run plan.
    pub fn settle(&self, balances: &mut BalanceMap) -> Vec<Transaction> {
        let (mut debtors, mut creditors) = self.partition(balances);
        let mut transactions = Vec::new();

        let mut d = 0;
        let mut c = 0;
        while d < debtors.len() && c < creditors.len() {
            let amount = debtors[d].remaining.clone().min(creditors[c].remaining.clone());
            let debtor = &mut debtors[d];
            let creditor = &mut creditors[c];

            debtor.remaining -= &amount;
            creditor.remaining -= &amount;
            if let Some(balance) = balances.get_mut(&debtor.person) {
                *balance += &amount;
            }
            if let Some(balance) = balances.get_mut(&creditor.person) {
                *balance -= &amount;
            }

            tracing::debug!(
                from = %debtor.person,
                to = %creditor.person,
                amount = %amount,
                "settlement transaction"
            );
            transactions.push(Transaction::new(
                debtor.person.clone(),
                creditor.person.clone(),
                amount,
            ));

            if self.is_cleared(&debtor.remaining) {
                d += 1;
            }
            if self.is_cleared(&creditor.remaining) {
                c += 1;
            }
        }

        transactions
    }

    /// A position is done once it drops below the tolerance or reaches zero
    fn is_cleared(&self, remaining: &BigDecimal) -> bool {
        *remaining < self.tolerance || *remaining <= BigDecimal::from(0)
    }

    /// Plan settlements without touching the given balances
    pub fn plan(&self, balances: &BalanceMap) -> Vec<Transaction> {
        let mut snapshot = balances.clone();
        self.settle(&mut snapshot)
    }

    /// Split balances into debtors and creditors, largest magnitude first.
    ///
    /// Balances within the tolerance of zero are left out. Sorting is stable,
    /// so equal magnitudes keep the map's name order.
    fn partition(&self, balances: &BalanceMap) -> (Vec<Position>, Vec<Position>) {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        let floor = -self.tolerance.clone();

        for (person, balance) in balances {
            if *balance < floor {
                debtors.push(Position {
                    person: person.clone(),
                    remaining: balance.abs(),
                });
            } else if *balance > self.tolerance {
                creditors.push(Position {
                    person: person.clone(),
                    remaining: balance.clone(),
                });
            }
        }

        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        (debtors, creditors)
    }
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(default_tolerance())
    }
}
