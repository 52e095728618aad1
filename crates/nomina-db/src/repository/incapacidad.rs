//! # Incapacidad Repository
//!
//! Medical / disability leave, listed with the employee and the registering
//! account embedded.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{empleados_por_id, usuarios_por_id};
use nomina_core::{Incapacidad, IncapacidadDetalle};

/// Repository for incapacidad database operations.
#[derive(Debug, Clone)]
pub struct IncapacidadRepository {
    pool: SqlitePool,
}

impl IncapacidadRepository {
    /// Creates a new IncapacidadRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IncapacidadRepository { pool }
    }

    /// Lists every leave record with its relations, most recent leave first.
    pub async fn list_with_relations(&self) -> DbResult<Vec<IncapacidadDetalle>> {
        let incapacidades = sqlx::query_as::<_, Incapacidad>(
            r#"
            SELECT
                id, empleado_id, tipo, motivo, fecha_inicio, fecha_fin,
                dias_incapacidad, registrado_por, created_at
            FROM incapacidades
            ORDER BY fecha_inicio DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let empleados = empleados_por_id(
            &self.pool,
            incapacidades.iter().map(|i| i.empleado_id.as_str()),
        )
        .await?;
        let registradores = usuarios_por_id(
            &self.pool,
            incapacidades.iter().map(|i| i.registrado_por.as_str()),
        )
        .await?;

        Ok(incapacidades
            .into_iter()
            .map(|incapacidad| IncapacidadDetalle {
                empleado: empleados.get(&incapacidad.empleado_id).cloned(),
                registrador: registradores.get(&incapacidad.registrado_por).cloned(),
                incapacidad,
            })
            .collect())
    }

    /// Inserts a leave record.
    ///
    /// ## Errors
    /// `NotFound` naming the missing side when `empleado_id` or
    /// `registrado_por` is unknown.
    pub async fn insert(&self, incapacidad: &Incapacidad) -> DbResult<Incapacidad> {
        debug!(
            id = %incapacidad.id,
            empleado_id = %incapacidad.empleado_id,
            dias = incapacidad.dias_incapacidad,
            "Inserting incapacidad"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO incapacidades (
                id, empleado_id, tipo, motivo, fecha_inicio, fecha_fin,
                dias_incapacidad, registrado_por, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&incapacidad.id)
        .bind(&incapacidad.empleado_id)
        .bind(&incapacidad.tipo)
        .bind(&incapacidad.motivo)
        .bind(incapacidad.fecha_inicio)
        .bind(incapacidad.fecha_fin)
        .bind(incapacidad.dias_incapacidad)
        .bind(&incapacidad.registrado_por)
        .bind(incapacidad.created_at)
        .execute(&self.pool)
        .await;

        match result.map_err(DbError::from) {
            Ok(_) => Ok(incapacidad.clone()),
            Err(DbError::ForeignKeyViolation { .. }) => {
                Err(self.missing_reference(incapacidad).await)
            }
            Err(e) => Err(e),
        }
    }

    /// SQLite does not say which foreign key failed; look it up.
    async fn missing_reference(&self, incapacidad: &Incapacidad) -> DbError {
        let empleado_existe: Result<Option<i64>, sqlx::Error> =
            sqlx::query_scalar("SELECT 1 FROM empleados WHERE id = ?1")
                .bind(&incapacidad.empleado_id)
                .fetch_optional(&self.pool)
                .await;

        match empleado_existe {
            Ok(Some(_)) => DbError::not_found("Usuario", &incapacidad.registrado_por),
            Ok(None) => DbError::not_found("Empleado", &incapacidad.empleado_id),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use chrono::NaiveDate;
    use nomina_core::{NuevaIncapacidad, Rol};

    fn nueva(empleado_id: &str, registrado_por: &str) -> NuevaIncapacidad {
        NuevaIncapacidad {
            empleado_id: Some(empleado_id.to_string()),
            tipo: Some("Enfermedad general".to_string()),
            motivo: Some("Gripe".to_string()),
            fecha_inicio: NaiveDate::from_ymd_opt(2025, 2, 10),
            fecha_fin: NaiveDate::from_ymd_opt(2025, 2, 12),
            dias_incapacidad: Some(3),
            registrado_por: Some(registrado_por.to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_with_relations() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 160).await;

        let incapacidad = nueva(&empleado.id, &admin.id)
            .into_incapacidad(fixtures::now())
            .unwrap();
        db.incapacidades().insert(&incapacidad).await.unwrap();

        let list = db.incapacidades().list_with_relations().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].incapacidad.dias_incapacidad, 3);
        assert_eq!(list[0].empleado.as_ref().unwrap().id, empleado.id);
        assert_eq!(list[0].registrador.as_ref().unwrap().id, admin.id);
    }

    #[tokio::test]
    async fn test_missing_references() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 160).await;

        let sin_empleado = nueva("no-existe", &admin.id)
            .into_incapacidad(fixtures::now())
            .unwrap();
        let err = db.incapacidades().insert(&sin_empleado).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Empleado"));

        let sin_usuario = nueva(&empleado.id, "no-existe")
            .into_incapacidad(fixtures::now())
            .unwrap();
        let err = db.incapacidades().insert(&sin_usuario).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Usuario"));
    }
}
