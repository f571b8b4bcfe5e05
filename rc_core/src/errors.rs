//! # Error Types
//!
//! Structured error types for rc_core. A failed design call is not always a
//! bug: an overloaded section is a legitimate engineering outcome and gets
//! its own variant so callers can distinguish it from bad input.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::errors::{DesignError, DesignResult};
//!
//! fn validate_width(width_mm: f64) -> DesignResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(DesignError::InvalidGeometry {
//!             field: "width_mm".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rc_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for design operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by downstream consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A dimension or geometric relation is non-physical
    /// (e.g., effective depth >= total depth, negative cover)
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Material grade or bar designation not in the closed code tables
    #[error("Unknown {kind}: {identifier}")]
    UnknownGrade { kind: String, identifier: String },

    /// Demand exceeds any achievable capacity for the given geometry.
    /// A legitimate design outcome, reported distinctly from a crash.
    #[error("Section inadequate for {member}: {reason}")]
    SectionInadequate { member: String, reason: String },

    /// Calculation failed for a numeric reason other than capacity
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },
}

impl DesignError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownGrade error
    pub fn unknown_grade(kind: impl Into<String>, identifier: impl Into<String>) -> Self {
        DesignError::UnknownGrade {
            kind: kind.into(),
            identifier: identifier.into(),
        }
    }

    /// Create a SectionInadequate error
    pub fn section_inadequate(member: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::SectionInadequate {
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// True when the error represents a legitimate design outcome
    /// (member needs a bigger section) rather than a caller mistake.
    pub fn is_design_outcome(&self) -> bool {
        matches!(self, DesignError::SectionInadequate { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            DesignError::UnknownGrade { .. } => "UNKNOWN_GRADE",
            DesignError::SectionInadequate { .. } => "SECTION_INADEQUATE",
            DesignError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DesignError::invalid_geometry("cover_mm", "-10", "Cover cannot be negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: DesignError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DesignError::unknown_grade("concrete class", "FC99").error_code(),
            "UNKNOWN_GRADE"
        );
        assert_eq!(
            DesignError::section_inadequate("beam B-1", "moment too large").error_code(),
            "SECTION_INADEQUATE"
        );
    }

    #[test]
    fn test_design_outcome_classification() {
        assert!(DesignError::section_inadequate("B-1", "overloaded").is_design_outcome());
        assert!(!DesignError::invalid_input("b", "0", "zero width").is_design_outcome());
    }
}
