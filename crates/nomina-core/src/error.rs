//! # Error Types
//!
//! Domain-specific error types for nomina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nomina-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nomina-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  nomina-api errors                                                     │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → HTTP         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested payable hours exceed the employee's current balance.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /pagos { horas_pagadas: 50 }
    ///      │
    ///      ▼
    /// Balance check: horas_trabajadas = 40
    ///      │
    ///      ▼
    /// InsufficientHours { available: 40, requested: 50 }
    ///      │
    ///      ▼
    /// 400: "Horas a pagar exceden las horas trabajadas"
    /// ```
    #[error("Insufficient hours: available {available}, requested {requested}")]
    InsufficientHours { available: i64, requested: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any database work happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Date range ends before it starts.
    #[error("{end} must not be before {start}")]
    InvalidDateRange { start: String, end: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientHours {
            available: 40,
            requested: 50,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient hours: available 40, requested 50"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("correo");
        assert_eq!(err.to_string(), "correo is required");

        let err = ValidationError::TooShort {
            field: "contrasena".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "contrasena must be at least 8 characters");

        let err = ValidationError::InvalidDateRange {
            start: "fecha_inicio".to_string(),
            end: "fecha_fin".to_string(),
        };
        assert_eq!(err.to_string(), "fecha_fin must not be before fecha_inicio");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("tipo").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
