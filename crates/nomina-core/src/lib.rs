//! # nomina-core: Pure Business Logic for Nómina
//!
//! This crate holds the domain model of the payroll service: entities,
//! input DTOs, validation rules and the payroll hours-balance rule. It has
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nómina Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web frontend (Next.js)                       │   │
//! │  │     Login ──► Maestros ──► Transacciones ──► Usuarios           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON + Bearer JWT                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    nomina-api (axum)                            │   │
//! │  │    /auth, /empleados, /contratos, /incapacidades, /pagos        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nomina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  payroll  │  │ validation│                  │   │
//! │  │   │ Empleado  │  │  balance  │  │   rules   │                  │   │
//! │  │   │   Pago    │  │  periodo  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    nomina-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Usuario, Empleado, Contrato, Incapacidad, Pago) and DTOs
//! - [`payroll`] - Hours balance rule and payroll period helpers
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use nomina_core::payroll::{check_hours_balance, remaining_hours};
//!
//! // An employee with 160 worked hours can be paid for 40 of them
//! assert!(check_hours_balance(160, 40).is_ok());
//! assert_eq!(remaining_hours(160, 40), 120);
//!
//! // ...but not for 200
//! assert!(check_hours_balance(160, 200).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod payroll;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum length of free-text fields (observaciones, motivo).
pub const MAX_TEXT_LEN: usize = 2000;

/// Maximum length of short fields (nombre, cargo, tipo, estado, metodo_pago).
pub const MAX_FIELD_LEN: usize = 200;
