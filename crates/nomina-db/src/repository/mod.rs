//! # Repository Module
//!
//! Database repository implementations for Nómina.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.pagos().create_with_balance(&pago)                   │
//! │       ▼                                                                 │
//! │  PagoRepository                                                        │
//! │  ├── list_with_relations()                                             │
//! │  ├── list_by_empleado_with_relations(empleado_id)                      │
//! │  └── create_with_balance(pago)  ← BEGIN / guarded UPDATE / INSERT      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Embedded Relations
//! List endpoints return records with their related empleado / usuario
//! embedded. Relations are loaded in one extra query per relation kind
//! (`WHERE id IN (SELECT value FROM json_each(?1))`) and stitched in
//! memory, never one query per row.
//!
//! ## Available Repositories
//!
//! - [`UsuarioRepository`] - Accounts, lookup by email, role changes
//! - [`EmpleadoRepository`] - Employee records
//! - [`ContratoRepository`] - Contracts
//! - [`IncapacidadRepository`] - Medical leave
//! - [`PagoRepository`] - Payments and the hours balance

use std::collections::{BTreeSet, HashMap};

use nomina_core::{Empleado, UsuarioPublico};
use sqlx::SqlitePool;

use crate::error::DbResult;

pub mod contrato;
pub mod empleado;
pub mod incapacidad;
pub mod pago;
pub mod usuario;

pub use contrato::ContratoRepository;
pub use empleado::EmpleadoRepository;
pub use incapacidad::IncapacidadRepository;
pub use pago::PagoRepository;
pub use usuario::UsuarioRepository;

pub(crate) const EMPLEADO_COLUMNS: &str = "id, nombre, correo, cargo, salario, fecha_ingreso, \
     horas_trabajadas, evaluacion_desempeno, creado_por, created_at";

pub(crate) const USUARIO_PUBLICO_COLUMNS: &str = "id, nombre, correo, rol, created_at";

/// Encodes a set of ids as a JSON array for `json_each`.
fn id_array<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let unique: BTreeSet<&str> = ids.into_iter().collect();
    serde_json::Value::from(unique.into_iter().collect::<Vec<_>>()).to_string()
}

/// Loads the empleados with the given ids, keyed by id.
pub(crate) async fn empleados_por_id<'a>(
    pool: &SqlitePool,
    ids: impl IntoIterator<Item = &'a str>,
) -> DbResult<HashMap<String, Empleado>> {
    let sql = format!(
        "SELECT {EMPLEADO_COLUMNS} FROM empleados \
         WHERE id IN (SELECT value FROM json_each(?1))"
    );

    let empleados: Vec<Empleado> = sqlx::query_as(&sql)
        .bind(id_array(ids))
        .fetch_all(pool)
        .await?;

    Ok(empleados.into_iter().map(|e| (e.id.clone(), e)).collect())
}

/// Loads the public view of the usuarios with the given ids, keyed by id.
pub(crate) async fn usuarios_por_id<'a>(
    pool: &SqlitePool,
    ids: impl IntoIterator<Item = &'a str>,
) -> DbResult<HashMap<String, UsuarioPublico>> {
    let sql = format!(
        "SELECT {USUARIO_PUBLICO_COLUMNS} FROM usuarios \
         WHERE id IN (SELECT value FROM json_each(?1))"
    );

    let usuarios: Vec<UsuarioPublico> = sqlx::query_as(&sql)
        .bind(id_array(ids))
        .fetch_all(pool)
        .await?;

    Ok(usuarios.into_iter().map(|u| (u.id.clone(), u)).collect())
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use nomina_core::{Empleado, NuevoEmpleado, NuevoUsuario, Rol, Usuario};

    use crate::{Database, DbConfig};

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
    }

    pub async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn usuario(db: &Database, correo: &str, rol: Rol) -> Usuario {
        let usuario = NuevoUsuario {
            nombre: Some("Usuario Prueba".to_string()),
            correo: Some(correo.to_string()),
            contrasena: Some("contrasena-segura".to_string()),
            rol: Some(rol),
        }
        .into_usuario("$argon2id$fixture".to_string(), rol, now())
        .unwrap();
        db.usuarios().insert(&usuario).await.unwrap();
        usuario
    }

    pub async fn empleado(db: &Database, creador: &Usuario, horas: i64) -> Empleado {
        let empleado = NuevoEmpleado {
            nombre: Some("Laura Gómez".to_string()),
            correo: Some("laura@empresa.co".to_string()),
            cargo: Some("Analista".to_string()),
            salario: Some(3_200_000),
            horas_trabajadas: Some(horas),
            ..Default::default()
        }
        .into_empleado(&creador.id, now())
        .unwrap();
        db.empleados().insert(&empleado).await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_array_dedups() {
        let json = id_array(["b", "a", "b"]);
        assert_eq!(json, r#"["a","b"]"#);
        assert_eq!(id_array(std::iter::empty()), "[]");
    }
}
