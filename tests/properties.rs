//! Property tests for splitting and settlement

use bigdecimal::BigDecimal;
use expense_ledger::{
    balance_deltas, BalanceMap, SettlementPlanner, SplitCalculator, SplitDetails, SplitMethod,
};
use proptest::prelude::*;

const PEOPLE: [&str; 6] = ["Ana", "Ben", "Cy", "Dee", "Eve", "Fay"];

fn cents(value: u64) -> BigDecimal {
    BigDecimal::from(value) / BigDecimal::from(100)
}

fn tolerance() -> BigDecimal {
    cents(1)
}

/// Payer index, total in cents, participant mask and share weights
fn expense_strategy() -> impl Strategy<Value = (usize, u64, Vec<bool>, Vec<u64>)> {
    (
        0..PEOPLE.len(),
        1u64..1_000_000,
        prop::collection::vec(any::<bool>(), PEOPLE.len()),
        prop::collection::vec(1u64..20, PEOPLE.len()),
    )
}

fn participants(mask: &[bool], payer: usize) -> Vec<String> {
    let mut chosen: Vec<String> = PEOPLE
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(name, _)| name.to_string())
        .collect();
    if chosen.is_empty() {
        chosen.push(PEOPLE[payer].to_string());
    }
    chosen
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: applying any sequence of equal and share-weighted expenses
    /// keeps the sum of all balances at zero.
    #[test]
    fn balances_always_sum_to_zero(
        expenses in prop::collection::vec((expense_strategy(), any::<bool>()), 1..12)
    ) {
        let calculator = SplitCalculator::default();
        let mut balances = BalanceMap::new();

        for ((payer, total_cents, mask, weights), weighted) in expenses {
            let people = participants(&mask, payer);
            let total = cents(total_cents);
            let (method, details) = if weighted {
                let details: SplitDetails = people
                    .iter()
                    .zip(&weights)
                    .map(|(p, w)| (p.clone(), BigDecimal::from(*w)))
                    .collect();
                (SplitMethod::Shares, details)
            } else {
                (SplitMethod::Equal, SplitDetails::new())
            };

            let shares = calculator
                .compute_shares(&people, method, &details, &total)
                .unwrap();
            for (person, delta) in balance_deltas(PEOPLE[payer], &total, &shares) {
                *balances.entry(person).or_default() += delta;
            }

            let sum: BigDecimal = balances.values().sum();
            prop_assert!(sum.abs() < tolerance());
        }
    }

    /// Property: whole-unit balances are fully settled in one pass, with
    /// fewer transactions than people involved.
    #[test]
    fn whole_unit_balances_settle_to_zero(
        expenses in prop::collection::vec(
            (0..PEOPLE.len(), prop::collection::vec(0u64..500, PEOPLE.len())),
            1..10
        )
    ) {
        let calculator = SplitCalculator::default();
        let planner = SettlementPlanner::default();
        let mut balances = BalanceMap::new();

        for (payer, amounts) in expenses {
            let details: SplitDetails = PEOPLE
                .iter()
                .zip(&amounts)
                .map(|(p, a)| (p.to_string(), BigDecimal::from(*a)))
                .collect();
            let total: BigDecimal = details.values().sum();
            if total == BigDecimal::from(0) {
                continue;
            }
            let people: Vec<String> = PEOPLE.iter().map(|p| p.to_string()).collect();
            let shares = calculator
                .compute_shares(&people, SplitMethod::Exact, &details, &total)
                .unwrap();
            for (person, delta) in balance_deltas(PEOPLE[payer], &total, &shares) {
                *balances.entry(person).or_default() += delta;
            }
        }

        let involved = balances
            .values()
            .filter(|b| **b != BigDecimal::from(0))
            .count();
        let transactions = planner.settle(&mut balances);

        prop_assert!(balances.values().all(|b| *b == BigDecimal::from(0)));
        prop_assert!(transactions.iter().all(|t| t.amount > BigDecimal::from(0)));
        prop_assert!(transactions.len() < involved.max(1));
        prop_assert!(planner.settle(&mut balances).is_empty());
    }
}
