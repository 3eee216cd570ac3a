//! Expense recording and management

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::ledger::balance::balance_deltas;
use crate::split::SplitCalculator;
use crate::traits::*;
use crate::types::*;

/// Expense manager for validating, splitting and recording expenses
pub struct ExpenseManager<S: LedgerStorage> {
    pub(crate) storage: S,
    calculator: SplitCalculator,
    validator: Box<dyn ExpenseValidator>,
}

impl<S: LedgerStorage> ExpenseManager<S> {
    /// Create a new expense manager
    pub fn new(storage: S, calculator: SplitCalculator) -> Self {
        Self {
            storage,
            calculator,
            validator: Box::new(DefaultExpenseValidator),
        }
    }

    /// Create a new expense manager with custom validator
    pub fn with_validator(
        storage: S,
        calculator: SplitCalculator,
        validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            storage,
            calculator,
            validator,
        }
    }

    /// Validate a draft, split it and record the resulting expense.
    ///
    /// Nothing is stored when any step fails.
    pub async fn record_expense(&self, draft: ExpenseDraft) -> LedgerResult<Expense> {
        let expense = match self.prepare_expense(draft) {
            Ok(expense) => expense,
            Err(err) => {
                tracing::warn!(kind = err.code(), "rejected expense: {}", err);
                return Err(err);
            }
        };

        let deltas = balance_deltas(&expense.payer, &expense.total, &expense.shares);
        self.storage.record_expense(&expense, &deltas).await?;

        tracing::info!(
            expense_id = %expense.id,
            payer = %expense.payer,
            total = %expense.total,
            method = %expense.split_method,
            "recorded expense"
        );
        Ok(expense)
    }

    /// Build the expense a draft would produce, without recording it
    pub fn prepare_expense(&self, draft: ExpenseDraft) -> LedgerResult<Expense> {
        let draft = draft.normalized();
        self.validator.validate_expense(&draft)?;

        let method: SplitMethod = draft.split_method.parse()?;
        let shares = self.calculator.compute_shares(
            &draft.participants,
            method,
            &draft.split_details,
            &draft.total,
        )?;

        Ok(Expense::new(
            draft.payer,
            draft.total,
            draft.participants,
            method,
            draft.split_details,
            shares,
        ))
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &Uuid) -> LedgerResult<Option<Expense>> {
        self.storage.get_expense(expense_id).await
    }

    /// List all expenses in insertion order
    pub async fn list_expenses(&self) -> LedgerResult<Vec<Expense>> {
        self.storage.list_expenses().await
    }
}

/// Builder for assembling an expense draft
#[derive(Debug)]
pub struct ExpenseBuilder {
    draft: ExpenseDraft,
}

impl ExpenseBuilder {
    /// Start a draft paid by `payer`, split equally by default
    pub fn new(payer: impl Into<String>, total: BigDecimal) -> Self {
        Self {
            draft: ExpenseDraft::new(
                payer.into(),
                total,
                Vec::new(),
                SplitMethod::Equal.to_string(),
            ),
        }
    }

    /// Add a participant
    pub fn participant(mut self, name: impl Into<String>) -> Self {
        self.draft.participants.push(name.into());
        self
    }

    /// Add several participants
    pub fn participants<I, P>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.draft
            .participants
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the split method
    pub fn split(mut self, method: SplitMethod) -> Self {
        self.draft.split_method = method.to_string();
        self
    }

    /// Set a split detail (amount, percentage or share weight)
    pub fn detail(mut self, name: impl Into<String>, value: BigDecimal) -> Self {
        self.draft.split_details.insert(name.into(), value);
        self
    }

    /// Add a participant together with their split detail
    pub fn participant_with(self, name: impl Into<String>, value: BigDecimal) -> Self {
        let name = name.into();
        self.participant(name.clone()).detail(name, value)
    }

    /// Build the draft, checking the basic input rules
    pub fn build(self) -> LedgerResult<ExpenseDraft> {
        let draft = self.draft.normalized();
        DefaultExpenseValidator.validate_expense(&draft)?;
        Ok(draft)
    }
}
