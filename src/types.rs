//! Core types and data structures for the expense ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::DEFAULT_DISPLAY_SCALE;

/// Net position of every person, keyed by name.
///
/// Positive means the group owes the person, negative means the person owes
/// the group. Iteration is in name order, which keeps settlement plans
/// reproducible.
pub type BalanceMap = BTreeMap<String, BigDecimal>;

/// Amount each person owes for a single expense
pub type ShareMap = BTreeMap<String, BigDecimal>;

/// Method-specific split parameters keyed by person
///
/// Exact amounts, percentages or share weights depending on the split method.
pub type SplitDetails = BTreeMap<String, BigDecimal>;

/// Policy used to distribute an expense total across participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Every participant owes the same amount
    Equal,
    /// Each participant owes the amount given in the split details
    Exact,
    /// Each participant owes a percentage of the total
    Percentage,
    /// Each participant owes in proportion to a share weight
    Shares,
}

impl SplitMethod {
    /// Wire tag of this method
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
            SplitMethod::Exact => "exact",
            SplitMethod::Percentage => "percentage",
            SplitMethod::Shares => "shares",
        }
    }

    /// Whether shares are driven by per-person split details
    pub fn uses_details(&self) -> bool {
        !matches!(self, SplitMethod::Equal)
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = LedgerError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "equal" => Ok(SplitMethod::Equal),
            "exact" => Ok(SplitMethod::Exact),
            "percentage" => Ok(SplitMethod::Percentage),
            "shares" => Ok(SplitMethod::Shares),
            other => Err(LedgerError::UnknownSplitMethod(other.to_string())),
        }
    }
}

/// Candidate expense as submitted by a caller, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Person who paid the bill
    pub payer: String,
    /// Amount paid
    pub total: BigDecimal,
    /// People sharing the bill, in display order
    pub participants: Vec<String>,
    /// Split method tag (`equal`, `exact`, `percentage` or `shares`)
    pub split_method: String,
    /// Method-specific parameters
    #[serde(default)]
    pub split_details: SplitDetails,
}

impl ExpenseDraft {
    /// Create a new draft with no split details
    pub fn new(
        payer: String,
        total: BigDecimal,
        participants: Vec<String>,
        split_method: String,
    ) -> Self {
        Self {
            payer,
            total,
            participants,
            split_method,
            split_details: SplitDetails::new(),
        }
    }

    /// Trim names, drop blank participants and collapse duplicates.
    ///
    /// The first occurrence of a participant keeps its position.
    pub fn normalized(mut self) -> Self {
        self.payer = self.payer.trim().to_string();

        let mut participants: Vec<String> = Vec::with_capacity(self.participants.len());
        for name in &self.participants {
            let name = name.trim();
            if !name.is_empty() && !participants.iter().any(|p| p == name) {
                participants.push(name.to_string());
            }
        }
        self.participants = participants;

        self.split_details = self
            .split_details
            .into_iter()
            .map(|(person, value)| (person.trim().to_string(), value))
            .collect();
        self
    }
}

/// A recorded expense. Never changes once the ledger has accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: Uuid,
    /// Person who paid the bill
    pub payer: String,
    /// Amount paid
    pub total: BigDecimal,
    /// People sharing the bill, in display order
    pub participants: Vec<String>,
    /// How the total was split
    pub split_method: SplitMethod,
    /// Parameters the split was computed from
    pub split_details: SplitDetails,
    /// Computed amount owed by each person
    pub shares: ShareMap,
    /// When the expense was recorded
    pub created_at: NaiveDateTime,
}

impl Expense {
    /// Create a new expense from validated parts
    pub fn new(
        payer: String,
        total: BigDecimal,
        participants: Vec<String>,
        split_method: SplitMethod,
        split_details: SplitDetails,
        shares: ShareMap,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer,
            total,
            participants,
            split_method,
            split_details,
            shares,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Sum of all computed shares
    pub fn total_shares(&self) -> BigDecimal {
        self.shares.values().sum()
    }
}

/// Settlement instruction: `from` pays `to` the given amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Person paying
    pub from: String,
    /// Person being paid
    pub to: String,
    /// Positive amount to transfer
    pub amount: BigDecimal,
}

impl Transaction {
    /// Create a new settlement transaction
    pub fn new(from: String, to: String, amount: BigDecimal) -> Self {
        Self { from, to, amount }
    }

    /// Amount rounded half-even to `scale` decimal places, zero padded
    pub fn display_amount(&self, scale: i64) -> BigDecimal {
        self.amount.round(scale).with_scale(scale)
    }
}

/// Rounds to the formatter precision when one is given (`{:.3}`), otherwise
/// to two decimals.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = f
            .precision()
            .map_or(DEFAULT_DISPLAY_SCALE, |precision| precision as i64);
        write!(f, "{} pays {} {}", self.from, self.to, self.display_amount(scale))
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown split method: {0}")]
    UnknownSplitMethod(String),
    #[error("Sum of exact amounts must equal total: expected {expected}, got {actual}")]
    AmountMismatch {
        expected: BigDecimal,
        actual: BigDecimal,
    },
    #[error("Sum of percentages must be 100, got {actual}")]
    PercentageMismatch { actual: BigDecimal },
    #[error("Total share weight must not be zero")]
    DegenerateShares,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    /// Stable snake_case identifier of the error kind
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::UnknownSplitMethod(_) => "unknown_split_method",
            LedgerError::AmountMismatch { .. } => "amount_mismatch",
            LedgerError::PercentageMismatch { .. } => "percentage_mismatch",
            LedgerError::DegenerateShares => "degenerate_shares",
            LedgerError::Storage(_) => "storage",
            LedgerError::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_method_parsing() {
        assert_eq!("equal".parse::<SplitMethod>().unwrap(), SplitMethod::Equal);
        assert_eq!(" shares ".parse::<SplitMethod>().unwrap(), SplitMethod::Shares);
        assert_eq!(
            "weighted".parse::<SplitMethod>(),
            Err(LedgerError::UnknownSplitMethod("weighted".to_string()))
        );
    }

    #[test]
    fn test_draft_normalization() {
        let draft = ExpenseDraft::new(
            " Alice ".to_string(),
            BigDecimal::from(30),
            vec![
                "Bob".to_string(),
                " ".to_string(),
                "Alice".to_string(),
                " Bob".to_string(),
            ],
            "equal".to_string(),
        )
        .normalized();

        assert_eq!(draft.payer, "Alice");
        assert_eq!(draft.participants, vec!["Bob".to_string(), "Alice".to_string()]);
    }

    #[test]
    fn test_transaction_display_rounds_to_cents() {
        let amount = BigDecimal::from(100) / BigDecimal::from(3);
        let transaction = Transaction::new("Bob".to_string(), "Alice".to_string(), amount);
        assert_eq!(transaction.to_string(), "Bob pays Alice 33.33");

        let whole = Transaction::new("Carol".to_string(), "Alice".to_string(), BigDecimal::from(40));
        assert_eq!(whole.to_string(), "Carol pays Alice 40.00");
        assert_eq!(format!("{:.1}", whole), "Carol pays Alice 40.0");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::DegenerateShares.code(), "degenerate_shares");
        assert_eq!(
            LedgerError::InvalidInput("x".to_string()).code(),
            "invalid_input"
        );
    }
}
