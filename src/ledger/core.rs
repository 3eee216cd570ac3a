//! Main ledger orchestrator that coordinates expenses and balances

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::ledger::{BalanceManager, ExpenseManager};
use crate::settlement::SettlementPlanner;
use crate::split::SplitCalculator;
use crate::traits::*;
use crate::types::*;

/// Main ledger system that orchestrates all expense operations
///
/// Every method takes `&self`; the storage serializes writers, so a ledger can
/// be shared between request handlers behind an `Arc`.
pub struct Ledger<S: LedgerStorage> {
    expense_manager: ExpenseManager<S>,
    balance_manager: BalanceManager<S>,
    config: LedgerConfig,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend and default settings
    pub fn new(storage: S) -> Self {
        Self::build(storage, LedgerConfig::default(), Box::new(DefaultExpenseValidator))
    }

    /// Create a new ledger with a custom configuration
    pub fn with_config(storage: S, config: LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self::build(storage, config, Box::new(DefaultExpenseValidator)))
    }

    /// Create a new ledger with a custom configuration and validator
    pub fn with_validator(
        storage: S,
        config: LedgerConfig,
        validator: Box<dyn ExpenseValidator>,
    ) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self::build(storage, config, validator))
    }

    fn build(storage: S, config: LedgerConfig, validator: Box<dyn ExpenseValidator>) -> Self {
        let calculator = SplitCalculator::new(config.tolerance.clone());
        let planner = SettlementPlanner::new(config.tolerance.clone());
        Self {
            expense_manager: ExpenseManager::with_validator(storage.clone(), calculator, validator),
            balance_manager: BalanceManager::new(storage, planner),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // Expense operations
    /// Record an expense and update balances
    pub async fn apply(&self, draft: ExpenseDraft) -> LedgerResult<Expense> {
        self.expense_manager.record_expense(draft).await
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &Uuid) -> LedgerResult<Option<Expense>> {
        self.expense_manager.get_expense(expense_id).await
    }

    /// List all expenses in the order they were recorded
    pub async fn list_expenses(&self) -> LedgerResult<Vec<Expense>> {
        self.expense_manager.list_expenses().await
    }

    // Balance operations
    /// Snapshot of every person's net balance
    pub async fn current_balances(&self) -> LedgerResult<BalanceMap> {
        self.balance_manager.current_balances().await
    }

    /// Net balance of one person
    pub async fn balance_of(&self, person: &str) -> LedgerResult<BigDecimal> {
        self.balance_manager.balance_of(person).await
    }

    /// Settle up: compute settlements and zero out the settled balances.
    ///
    /// This mutates the ledger. Use [`Ledger::preview_settlements`] to see the
    /// plan without applying it.
    pub async fn compute_settlements(&self) -> LedgerResult<Vec<Transaction>> {
        self.balance_manager.settle_up().await
    }

    /// Settlement plan for the current balances, without applying it
    pub async fn preview_settlements(&self) -> LedgerResult<Vec<Transaction>> {
        self.balance_manager.preview_settlements().await
    }

    /// Validate the integrity of the ledger
    pub async fn validate_integrity(&self) -> LedgerResult<LedgerIntegrityReport> {
        let expenses = self.list_expenses().await?;
        let balances = self.current_balances().await?;
        let tolerance = &self.config.tolerance;

        let mut issues = Vec::new();

        let balance_sum: BigDecimal = balances.values().sum();
        if balance_sum.abs() > *tolerance {
            issues.push(format!(
                "Balances do not sum to zero: sum = {}",
                balance_sum
            ));
        }

        for expense in &expenses {
            let shares = expense.total_shares();
            if (&shares - &expense.total).abs() > *tolerance {
                issues.push(format!(
                    "Expense {} shares sum to {} but total is {}",
                    expense.id, shares, expense.total
                ));
            }
        }

        let total_spent: BigDecimal = expenses.iter().map(|e| &e.total).sum();
        let outstanding = balances
            .values()
            .filter(|balance| balance.abs() > *tolerance)
            .count();

        Ok(LedgerIntegrityReport {
            is_valid: issues.is_empty(),
            issues,
            expense_count: expenses.len(),
            total_spent,
            balance_sum,
            outstanding_people: outstanding,
        })
    }
}

/// Report on ledger integrity and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub expense_count: usize,
    pub total_spent: BigDecimal,
    pub balance_sum: BigDecimal,
    /// People whose balance is not yet settled
    pub outstanding_people: usize,
}
