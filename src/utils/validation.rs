//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Longest accepted person name
pub const MAX_NAME_LEN: usize = 100;

/// Validate that a total is positive
pub fn validate_positive_total(total: &BigDecimal) -> LedgerResult<()> {
    if *total <= BigDecimal::from(0) {
        Err(LedgerError::InvalidInput(
            "Total must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a person name is valid
pub fn validate_person_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "Person name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(LedgerError::InvalidInput(format!(
            "Person name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }

    Ok(())
}

/// Parse split details written one per line as `Name:Value`.
///
/// Blank lines are skipped. A line without a colon, with an empty name or
/// with a value that is not a number is rejected.
pub fn parse_split_details(text: &str) -> LedgerResult<SplitDetails> {
    let mut details = SplitDetails::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, value) = line.rsplit_once(':').ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "Line {} must look like Name:Value, got '{}'",
                index + 1,
                line
            ))
        })?;

        let name = name.trim();
        validate_person_name(name)?;

        let value = BigDecimal::from_str(value.trim()).map_err(|_| {
            LedgerError::InvalidInput(format!(
                "Line {} has an invalid number: '{}'",
                index + 1,
                value.trim()
            ))
        })?;

        details.insert(name.to_string(), value);
    }

    Ok(details)
}

/// Strict expense validator with detailed checks
///
/// On top of the default rules it checks name lengths, rejects negative split
/// details, and requires a detail for every participant when the split method
/// depends on them.
pub struct StrictExpenseValidator;

impl ExpenseValidator for StrictExpenseValidator {
    fn validate_expense(&self, draft: &ExpenseDraft) -> LedgerResult<()> {
        // Basic validation
        DefaultExpenseValidator.validate_expense(draft)?;

        validate_person_name(&draft.payer)?;
        validate_positive_total(&draft.total)?;
        for participant in &draft.participants {
            validate_person_name(participant)?;
        }

        for (person, value) in &draft.split_details {
            if *value < BigDecimal::from(0) {
                return Err(LedgerError::InvalidInput(format!(
                    "Split detail for '{}' cannot be negative",
                    person
                )));
            }
        }

        // Unknown tags are reported by the split calculator
        let Ok(method) = draft.split_method.parse::<SplitMethod>() else {
            return Ok(());
        };

        if method.uses_details() {
            if let Some(missing) = draft
                .participants
                .iter()
                .find(|p| !draft.split_details.contains_key(*p))
            {
                return Err(LedgerError::InvalidInput(format!(
                    "Missing {} split detail for participant '{}'",
                    method, missing
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(method: &str, details: &[(&str, i64)]) -> ExpenseDraft {
        let mut draft = ExpenseDraft::new(
            "Alice".to_string(),
            BigDecimal::from(100),
            vec!["Alice".to_string(), "Bob".to_string()],
            method.to_string(),
        );
        draft.split_details = details
            .iter()
            .map(|(k, v)| (k.to_string(), BigDecimal::from(*v)))
            .collect();
        draft
    }

    #[test]
    fn test_parse_split_details() {
        let details = parse_split_details("John:100.50\n\n Jane : 150\nBob:0").unwrap();

        assert_eq!(details.len(), 3);
        assert_eq!(details["John"], BigDecimal::from_str("100.50").unwrap());
        assert_eq!(details["Jane"], BigDecimal::from(150));
        assert_eq!(details["Bob"], BigDecimal::from(0));
    }

    #[test]
    fn test_parse_split_details_rejects_malformed_lines() {
        assert!(matches!(
            parse_split_details("John 100"),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_split_details("John:lots"),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_split_details(":10"),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_person_name_length() {
        assert!(validate_person_name("Alice").is_ok());
        assert!(validate_person_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_strict_validator_requires_detail_per_participant() {
        let validator = StrictExpenseValidator;

        assert!(validator
            .validate_expense(&draft("exact", &[("Alice", 60), ("Bob", 40)]))
            .is_ok());
        assert!(matches!(
            validator.validate_expense(&draft("exact", &[("Alice", 100)])),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(validator.validate_expense(&draft("equal", &[])).is_ok());
    }

    #[test]
    fn test_strict_validator_rejects_negative_details() {
        let validator = StrictExpenseValidator;

        assert!(matches!(
            validator.validate_expense(&draft("shares", &[("Alice", 2), ("Bob", -1)])),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strict_validator_leaves_unknown_methods_to_calculator() {
        let validator = StrictExpenseValidator;
        assert!(validator.validate_expense(&draft("halves", &[])).is_ok());
    }
}
