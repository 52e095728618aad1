//! # nomina-db: Database Layer for Nómina
//!
//! This crate provides database access for the Nómina payroll service.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nómina Data Flow                                 │
//! │                                                                         │
//! │  axum handler (POST /pagos)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     nomina-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UsuarioRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ EmpleadoRepo  │    │ 001_initial_ │  │   │
//! │  │   │ WAL, FKs on   │    │ ContratoRepo  │    │   schema.sql │  │   │
//! │  │   │ busy_timeout  │    │ Incapacidad.. │    │              │  │   │
//! │  │   │               │    │ PagoRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                  ./data/nomina.db (DATABASE_PATH)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nomina_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/nomina.db")).await?;
//! let empleados = db.empleados().list_with_creador().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::{
    ContratoRepository, EmpleadoRepository, IncapacidadRepository, PagoRepository,
    UsuarioRepository,
};
