//! Split calculation engine turning an expense total into per-person shares

use bigdecimal::BigDecimal;

use crate::config::default_tolerance;
use crate::types::*;

/// Split calculation engine
#[derive(Debug, Clone)]
pub struct SplitCalculator {
    /// Slack allowed when checking that exact amounts or percentages add up
    tolerance: BigDecimal,
}

impl SplitCalculator {
    /// Create a new split calculator with the given tolerance
    pub fn new(tolerance: BigDecimal) -> Self {
        Self { tolerance }
    }

    /// Compute shares for a split method given by its tag
    pub fn compute_shares_for_tag(
        &self,
        participants: &[String],
        tag: &str,
        details: &SplitDetails,
        total: &BigDecimal,
    ) -> LedgerResult<ShareMap> {
        let method: SplitMethod = tag.parse()?;
        self.compute_shares(participants, method, details, total)
    }

    /// Compute the amount each person owes.
    ///
    /// Every participant gets an entry, defaulting to zero, and a name listed
    /// twice counts once. For the
    /// detail-driven methods a detail naming a non-participant also yields a
    /// share, so the shares always add up to the total.
    pub fn compute_shares(
        &self,
        participants: &[String],
        method: SplitMethod,
        details: &SplitDetails,
        total: &BigDecimal,
    ) -> LedgerResult<ShareMap> {
        let mut shares = match method {
            SplitMethod::Equal => self.equal_shares(participants, total)?,
            SplitMethod::Exact => self.exact_shares(details, total)?,
            SplitMethod::Percentage => self.percentage_shares(details, total)?,
            SplitMethod::Shares => self.weighted_shares(details, total)?,
        };

        for participant in participants {
            shares
                .entry(participant.clone())
                .or_insert_with(|| BigDecimal::from(0));
        }

        tracing::debug!(method = %method, people = shares.len(), "computed shares");
        Ok(shares)
    }

    fn equal_shares(&self, participants: &[String], total: &BigDecimal) -> LedgerResult<ShareMap> {
        if participants.is_empty() {
            return Err(LedgerError::InvalidInput(
                "Participants cannot be empty".to_string(),
            ));
        }

        let mut distinct: Vec<&String> = Vec::with_capacity(participants.len());
        for participant in participants {
            if !distinct.contains(&participant) {
                distinct.push(participant);
            }
        }

        let share = total.clone() / BigDecimal::from(distinct.len() as u64);
        Ok(distinct
            .into_iter()
            .map(|p| (p.clone(), share.clone()))
            .collect())
    }

    fn exact_shares(&self, details: &SplitDetails, total: &BigDecimal) -> LedgerResult<ShareMap> {
        let sum: BigDecimal = details.values().sum();
        if !self.within_tolerance(&sum, total) {
            return Err(LedgerError::AmountMismatch {
                expected: total.clone(),
                actual: sum,
            });
        }

        Ok(details.clone())
    }

    fn percentage_shares(
        &self,
        details: &SplitDetails,
        total: &BigDecimal,
    ) -> LedgerResult<ShareMap> {
        let sum: BigDecimal = details.values().sum();
        if !self.within_tolerance(&sum, &BigDecimal::from(100)) {
            return Err(LedgerError::PercentageMismatch { actual: sum });
        }

        Ok(details
            .iter()
            .map(|(person, percent)| (person.clone(), (percent * total) / BigDecimal::from(100)))
            .collect())
    }

    fn weighted_shares(&self, details: &SplitDetails, total: &BigDecimal) -> LedgerResult<ShareMap> {
        let weight: BigDecimal = details.values().sum();
        if weight == BigDecimal::from(0) {
            return Err(LedgerError::DegenerateShares);
        }

        Ok(details
            .iter()
            .map(|(person, w)| (person.clone(), (w * total) / weight.clone()))
            .collect())
    }

    fn within_tolerance(&self, actual: &BigDecimal, expected: &BigDecimal) -> bool {
        (actual - expected).abs() <= self.tolerance
    }
}

impl Default for SplitCalculator {
    fn default() -> Self {
        Self::new(default_tolerance())
    }
}
