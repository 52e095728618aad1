//! # Validation Module
//!
//! Input validation utilities for Nómina.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (required inputs)                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules, via the DTOs' validate()                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (usuarios.correo)                                          │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nomina_core::validation::{validate_email, validate_positive};
//!
//! validate_email("ana@empresa.co").unwrap();
//! validate_positive("horas_pagadas", 8).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_FIELD_LEN, MAX_TEXT_LEN, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required short text field (nombre, tipo, estado, ...).
///
/// ## Rules
/// - Must be present and not blank after trimming
/// - At most [`MAX_FIELD_LEN`] characters
///
/// ## Example
/// ```rust
/// use nomina_core::validation::validate_required_text;
///
/// assert!(validate_required_text("tipo", Some("Indefinido")).is_ok());
/// assert!(validate_required_text("tipo", Some("   ")).is_err());
/// assert!(validate_required_text("tipo", None).is_err());
/// ```
pub fn validate_required_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    check_max_len(field, value, MAX_FIELD_LEN)
}

/// Validates an optional short text field. Blank counts as absent.
pub fn validate_optional_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => check_max_len(field, v, MAX_FIELD_LEN),
        _ => Ok(()),
    }
}

/// Validates an optional free-text field (observaciones).
pub fn validate_long_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(v) => check_max_len(field, v.trim(), MAX_TEXT_LEN),
        None => Ok(()),
    }
}

/// Validates a required reference to another record.
///
/// Only presence and length are checked here; existence is the database's
/// job (foreign keys).
pub fn validate_required_id(field: &str, value: Option<&str>) -> ValidationResult<()> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    check_max_len(field, value, 64)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
///
/// ## Example
/// ```rust
/// use nomina_core::validation::validate_email;
///
/// assert!(validate_email("admin@nomina.co").is_ok());
/// assert!(validate_email("admin@nomina").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(correo: &str) -> ValidationResult<()> {
    let correo = correo.trim();

    if correo.is_empty() {
        return Err(ValidationError::required("correo"));
    }

    check_max_len("correo", correo, MAX_FIELD_LEN)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "correo".to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if correo.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = correo.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a new password.
///
/// ## Rules
/// - Must not be empty
/// - At least [`MIN_PASSWORD_LEN`] characters
pub fn validate_password(contrasena: &str) -> ValidationResult<()> {
    if contrasena.is_empty() {
        return Err(ValidationError::required("contrasena"));
    }

    if contrasena.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "contrasena".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

fn check_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a strictly positive quantity (hours to pay, leave days).
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a quantity that may be zero (worked-hours balance).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a money amount in whole currency units.
///
/// ## Example
/// ```rust
/// use nomina_core::validation::validate_money;
///
/// assert!(validate_money("salario", 2_500_000).is_ok());
/// assert!(validate_money("salario", 0).is_ok());
/// assert!(validate_money("salario", -1).is_err());
/// ```
pub fn validate_money(field: &str, amount: i64) -> ValidationResult<()> {
    validate_non_negative(field, amount)
}

/// Validates a payroll month (1..=12).
pub fn validate_month(mes: i32) -> ValidationResult<()> {
    if !(1..=12).contains(&mes) {
        return Err(ValidationError::OutOfRange {
            field: "mes".to_string(),
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

/// Validates a payroll year (1900..=2100).
pub fn validate_year(anio: i32) -> ValidationResult<()> {
    if !(1900..=2100).contains(&anio) {
        return Err(ValidationError::OutOfRange {
            field: "anio".to_string(),
            min: 1900,
            max: 2100,
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that `fin` is not before `inicio`.
pub fn validate_date_range(inicio: NaiveDate, fin: NaiveDate) -> ValidationResult<()> {
    if fin < inicio {
        return Err(ValidationError::InvalidDateRange {
            start: "fecha_inicio".to_string(),
            end: "fecha_fin".to_string(),
        });
    }
    Ok(())
}

/// Validates the number of leave days against its date range.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed the inclusive span `fecha_inicio..=fecha_fin`
///
/// ```text
/// 2025-01-10 ──► 2025-01-12   span = 3 days
/// dias_incapacidad ∈ 1..=3
/// ```
pub fn validate_leave_days(dias: i32, inicio: NaiveDate, fin: NaiveDate) -> ValidationResult<()> {
    validate_positive("dias_incapacidad", i64::from(dias))?;

    let span = (fin - inicio).num_days() + 1;
    if i64::from(dias) > span {
        return Err(ValidationError::OutOfRange {
            field: "dias_incapacidad".to_string(),
            min: 1,
            max: span.max(1),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("nombre", Some("Ana")).is_ok());
        assert_eq!(
            validate_required_text("nombre", Some("  ")),
            Err(ValidationError::required("nombre"))
        );
        assert!(validate_required_text("nombre", Some(&"x".repeat(201))).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@empresa.co").is_ok());
        assert!(validate_email("  ana.maria+rh@sub.empresa.com ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@empresa.co").is_err());
        assert!(validate_email("ana@empresa").is_err());
        assert!(validate_email("ana@.co").is_err());
        assert!(validate_email("ana@empresa.").is_err());
        assert!(validate_email("ana maria@empresa.co").is_err());
        assert!(validate_email("a@b@empresa.co").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secreto123").is_ok());
        assert_eq!(
            validate_password(""),
            Err(ValidationError::required("contrasena"))
        );
        assert!(matches!(
            validate_password("corta"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_positive("horas_pagadas", 1).is_ok());
        assert!(validate_positive("horas_pagadas", 0).is_err());
        assert!(validate_non_negative("horas_trabajadas", 0).is_ok());
        assert!(validate_non_negative("horas_trabajadas", -1).is_err());
        assert!(validate_money("monto_pagado", -5).is_err());
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
        assert!(validate_year(2025).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2101).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 6, 30)).is_ok());
        assert!(validate_date_range(date(2025, 2, 1), date(2025, 1, 31)).is_err());
    }

    #[test]
    fn test_validate_leave_days() {
        let inicio = date(2025, 1, 10);
        let fin = date(2025, 1, 12);
        assert!(validate_leave_days(3, inicio, fin).is_ok());
        assert!(validate_leave_days(1, inicio, fin).is_ok());
        assert!(validate_leave_days(4, inicio, fin).is_err());
        assert!(validate_leave_days(0, inicio, fin).is_err());
        assert!(validate_leave_days(1, inicio, inicio).is_ok());
    }
}
