//! # Contrato Repository
//!
//! Employment contracts, listed with their employee embedded.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::empleados_por_id;
use nomina_core::{Contrato, ContratoDetalle};

/// Repository for contrato database operations.
#[derive(Debug, Clone)]
pub struct ContratoRepository {
    pool: SqlitePool,
}

impl ContratoRepository {
    /// Creates a new ContratoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ContratoRepository { pool }
    }

    /// Lists every contract with its employee, newest first.
    pub async fn list_with_empleado(&self) -> DbResult<Vec<ContratoDetalle>> {
        let contratos = sqlx::query_as::<_, Contrato>(
            r#"
            SELECT
                id, empleado_id, tipo, fecha_inicio, fecha_fin, salario,
                estado, observaciones, registrado_por, created_at
            FROM contratos
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let empleados =
            empleados_por_id(&self.pool, contratos.iter().map(|c| c.empleado_id.as_str())).await?;

        Ok(contratos
            .into_iter()
            .map(|contrato| ContratoDetalle {
                empleado: empleados.get(&contrato.empleado_id).cloned(),
                contrato,
            })
            .collect())
    }

    /// Inserts a contract.
    ///
    /// ## Errors
    /// `NotFound` if `empleado_id` references an unknown employee.
    pub async fn insert(&self, contrato: &Contrato) -> DbResult<Contrato> {
        debug!(
            id = %contrato.id,
            empleado_id = %contrato.empleado_id,
            tipo = %contrato.tipo,
            "Inserting contrato"
        );

        sqlx::query(
            r#"
            INSERT INTO contratos (
                id, empleado_id, tipo, fecha_inicio, fecha_fin, salario,
                estado, observaciones, registrado_por, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&contrato.id)
        .bind(&contrato.empleado_id)
        .bind(&contrato.tipo)
        .bind(contrato.fecha_inicio)
        .bind(contrato.fecha_fin)
        .bind(contrato.salario)
        .bind(&contrato.estado)
        .bind(&contrato.observaciones)
        .bind(&contrato.registrado_por)
        .bind(contrato.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => {
                DbError::not_found("Empleado", &contrato.empleado_id)
            }
            other => other,
        })?;

        Ok(contrato.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use chrono::NaiveDate;
    use nomina_core::{NuevoContrato, Rol};

    fn nuevo(empleado_id: &str) -> NuevoContrato {
        NuevoContrato {
            empleado_id: Some(empleado_id.to_string()),
            tipo: Some("Término fijo".to_string()),
            fecha_inicio: NaiveDate::from_ymd_opt(2025, 1, 1),
            fecha_fin: NaiveDate::from_ymd_opt(2025, 12, 31),
            salario: Some(3_200_000),
            estado: Some("ACTIVO".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 160).await;

        let contrato = nuevo(&empleado.id)
            .into_contrato(&admin.id, fixtures::now())
            .unwrap();
        db.contratos().insert(&contrato).await.unwrap();

        let list = db.contratos().list_with_empleado().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].contrato, contrato);
        assert_eq!(list[0].contrato.registrado_por.as_deref(), Some(admin.id.as_str()));
        assert_eq!(list[0].empleado.as_ref().map(|e| e.id.as_str()), Some(empleado.id.as_str()));
    }

    #[tokio::test]
    async fn test_unknown_empleado_is_not_found() {
        let db = fixtures::db().await;
        let contrato = nuevo("no-existe")
            .into_contrato("admin", fixtures::now())
            .unwrap();

        let err = db.contratos().insert(&contrato).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Empleado"));
    }
}
