//! # Empleado Repository
//!
//! Employee records. `horas_trabajadas` is only ever decremented by
//! [`PagoRepository::create_with_balance`](crate::PagoRepository::create_with_balance).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{usuarios_por_id, EMPLEADO_COLUMNS};
use nomina_core::{Empleado, EmpleadoDetalle};

/// Repository for empleado database operations.
#[derive(Debug, Clone)]
pub struct EmpleadoRepository {
    pool: SqlitePool,
}

impl EmpleadoRepository {
    /// Creates a new EmpleadoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmpleadoRepository { pool }
    }

    /// Lists every employee, newest first.
    pub async fn list(&self) -> DbResult<Vec<Empleado>> {
        let sql = format!(
            "SELECT {EMPLEADO_COLUMNS} FROM empleados ORDER BY created_at DESC, id"
        );

        let empleados = sqlx::query_as::<_, Empleado>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(empleados)
    }

    /// Lists every employee with the account that created it.
    pub async fn list_with_creador(&self) -> DbResult<Vec<EmpleadoDetalle>> {
        let empleados = self.list().await?;

        let creadores = usuarios_por_id(
            &self.pool,
            empleados.iter().filter_map(|e| e.creado_por.as_deref()),
        )
        .await?;

        Ok(empleados
            .into_iter()
            .map(|empleado| {
                let creador = empleado
                    .creado_por
                    .as_deref()
                    .and_then(|id| creadores.get(id).cloned());
                EmpleadoDetalle { empleado, creador }
            })
            .collect())
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Empleado>> {
        let sql = format!("SELECT {EMPLEADO_COLUMNS} FROM empleados WHERE id = ?1");

        let empleado = sqlx::query_as::<_, Empleado>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(empleado)
    }

    /// Inserts an employee and returns it as stored.
    ///
    /// ## Errors
    /// `NotFound` if `creado_por` references an unknown usuario.
    pub async fn insert(&self, empleado: &Empleado) -> DbResult<Empleado> {
        debug!(
            id = %empleado.id,
            horas_trabajadas = empleado.horas_trabajadas,
            "Inserting empleado"
        );

        sqlx::query(
            r#"
            INSERT INTO empleados (
                id, nombre, correo, cargo, salario, fecha_ingreso,
                horas_trabajadas, evaluacion_desempeno, creado_por, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&empleado.id)
        .bind(&empleado.nombre)
        .bind(&empleado.correo)
        .bind(&empleado.cargo)
        .bind(empleado.salario)
        .bind(empleado.fecha_ingreso)
        .bind(empleado.horas_trabajadas)
        .bind(&empleado.evaluacion_desempeno)
        .bind(&empleado.creado_por)
        .bind(empleado.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => DbError::not_found(
                "Usuario",
                empleado.creado_por.clone().unwrap_or_default(),
            ),
            other => other,
        })?;

        Ok(empleado.clone())
    }
}
