//! Ledger configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Tunables shared by the split calculator, settlement planner and ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Absolute tolerance under which an amount counts as zero (default 0.01)
    pub tolerance: BigDecimal,
    /// Decimal places used when presenting amounts (default 2)
    pub display_scale: i64,
}

/// Decimal places shown when no display scale is configured
pub const DEFAULT_DISPLAY_SCALE: i64 = 2;

impl LedgerConfig {
    /// Largest accepted display scale
    pub const MAX_DISPLAY_SCALE: i64 = 10;

    /// Create a configuration with the default tolerance of one cent
    pub fn new() -> Self {
        Self {
            tolerance: default_tolerance(),
            display_scale: DEFAULT_DISPLAY_SCALE,
        }
    }

    /// Replace the zero tolerance
    pub fn with_tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the display scale
    pub fn with_display_scale(mut self, display_scale: i64) -> Self {
        self.display_scale = display_scale;
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> LedgerResult<()> {
        if self.tolerance <= BigDecimal::from(0) {
            return Err(LedgerError::InvalidConfig(format!(
                "Tolerance must be positive: {}",
                self.tolerance
            )));
        }

        if !(0..=Self::MAX_DISPLAY_SCALE).contains(&self.display_scale) {
            return Err(LedgerError::InvalidConfig(format!(
                "Display scale must be between 0 and {}, got {}",
                Self::MAX_DISPLAY_SCALE,
                self.display_scale
            )));
        }

        Ok(())
    }

    /// Round an amount half-even to the display scale, zero padded
    pub fn display_amount(&self, amount: &BigDecimal) -> BigDecimal {
        amount.round(self.display_scale).with_scale(self.display_scale)
    }

    /// Render a settlement transaction at the display scale
    pub fn describe(&self, transaction: &Transaction) -> String {
        format!("{:.*}", self.display_scale as usize, transaction)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One cent
pub fn default_tolerance() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100)
}
