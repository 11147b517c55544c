//! Link budget error types

use thiserror::Error;

/// Result type for link budget operations
pub type BudgetResult<T> = Result<T, LinkBudgetError>;

/// Errors raised before any link budget computation proceeds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkBudgetError {
    /// A numeric input is outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A preset or MODCOD name is not in its lookup table
    #[error("Unknown {kind} '{name}'")]
    UnknownPreset { kind: &'static str, name: String },
}

impl LinkBudgetError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LinkBudgetError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        LinkBudgetError::UnknownPreset {
            kind,
            name: name.into(),
        }
    }

    /// Every variant is an invalid-parameter failure from the caller's point of view
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            LinkBudgetError::InvalidParameter { .. } | LinkBudgetError::UnknownPreset { .. }
        )
    }
}

/// Reject values that are zero, negative, NaN or infinite
pub(crate) fn require_positive(name: &'static str, value: f64) -> BudgetResult<f64> {
    if !value.is_finite() {
        return Err(LinkBudgetError::invalid(name, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(LinkBudgetError::invalid(name, format!("must be positive, got {}", value)));
    }
    Ok(value)
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> BudgetResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LinkBudgetError::invalid(name, format!("must be finite, got {}", value)))
    }
}
