//! # Payroll Rules
//!
//! The hours-balance rule behind every payment.
//!
//! ## Balance Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Empleado.horas_trabajadas = remaining payable hours                   │
//! │                                                                         │
//! │     160 ──► POST /pagos { horas_pagadas: 40 } ──► 120                  │
//! │     120 ──► POST /pagos { horas_pagadas: 200 } ──► rejected, 120       │
//! │                                                                         │
//! │  Invariant: horas_trabajadas never drops below zero.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database layer enforces the same rule atomically with a guarded
//! `UPDATE`; these functions are the pure statement of it.

use chrono::{Datelike, NaiveDate};

use crate::error::{CoreError, CoreResult, ValidationError};

/// Checks that `requested` hours can be paid out of `available`.
///
/// ## Errors
/// - `Validation(MustBePositive)` if `requested <= 0`
/// - `InsufficientHours` if `requested > available`
pub fn check_hours_balance(available: i64, requested: i64) -> CoreResult<()> {
    if requested <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "horas_pagadas".to_string(),
        }
        .into());
    }

    if requested > available {
        return Err(CoreError::InsufficientHours {
            available,
            requested,
        });
    }

    Ok(())
}

/// Balance left after paying `requested` hours. Assumes the check passed.
#[inline]
pub fn remaining_hours(available: i64, requested: i64) -> i64 {
    available - requested
}

/// Payroll period `(mes, anio)` of a payment date.
pub fn periodo_de(fecha: NaiveDate) -> (i32, i32) {
    (fecha.month() as i32, fecha.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_hours_balance() {
        assert!(check_hours_balance(160, 40).is_ok());
        assert!(check_hours_balance(40, 40).is_ok());

        assert!(matches!(
            check_hours_balance(40, 41),
            Err(CoreError::InsufficientHours {
                available: 40,
                requested: 41
            })
        ));
        assert!(matches!(
            check_hours_balance(0, 1),
            Err(CoreError::InsufficientHours { .. })
        ));
        assert!(matches!(
            check_hours_balance(40, 0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_remaining_hours() {
        assert_eq!(remaining_hours(160, 40), 120);
        assert_eq!(remaining_hours(40, 40), 0);
    }

    #[test]
    fn test_periodo_de() {
        let fecha = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(periodo_de(fecha), (12, 2024));
    }
}
