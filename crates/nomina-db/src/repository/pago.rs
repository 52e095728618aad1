//! # Pago Repository
//!
//! Payments and the employee hours balance they draw from.
//!
//! ## Balance-Guarded Payment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_with_balance(pago)                            │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE empleados                                                      │
//! │     SET horas_trabajadas = horas_trabajadas - h                        │
//! │   WHERE id = ? AND horas_trabajadas >= h        ← takes the write lock │
//! │   RETURNING horas_trabajadas                                           │
//! │    │                                                                    │
//! │    ├── no row ──► SELECT horas_trabajadas (same tx)                    │
//! │    │                 ├── none   → ROLLBACK, NotFound        (404)      │
//! │    │                 └── some h → ROLLBACK, InsufficientHours (400)    │
//! │    ▼                                                                    │
//! │  INSERT INTO pagos (...)                                               │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The write comes first so the check and the decrement happen under the
//! same SQLite write lock: two concurrent payments against one employee are
//! serialized and the second one sees the first one's decrement. A
//! dropped transaction rolls back, so an error at any step leaves neither
//! the decrement nor the pago row behind.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{empleados_por_id, usuarios_por_id};
use nomina_core::payroll::check_hours_balance;
use nomina_core::validation::validate_positive;
use nomina_core::{CoreError, Pago, PagoDetalle};

const PAGO_COLUMNS: &str = "id, empleado_id, mes, anio, fecha_pago, monto_pagado, metodo_pago, \
     horas_pagadas, observaciones, registrado_por_id, created_at";

/// Repository for pago database operations.
#[derive(Debug, Clone)]
pub struct PagoRepository {
    pool: SqlitePool,
}

impl PagoRepository {
    /// Creates a new PagoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PagoRepository { pool }
    }

    /// Lists every payment with its relations, most recent first.
    pub async fn list_with_relations(&self) -> DbResult<Vec<PagoDetalle>> {
        let sql = format!(
            "SELECT {PAGO_COLUMNS} FROM pagos ORDER BY fecha_pago DESC, created_at DESC"
        );

        let pagos = sqlx::query_as::<_, Pago>(&sql)
            .fetch_all(&self.pool)
            .await?;

        self.with_relations(pagos).await
    }

    /// Lists the payments of one employee, most recent first.
    ///
    /// An unknown employee simply has no payments.
    pub async fn list_by_empleado_with_relations(
        &self,
        empleado_id: &str,
    ) -> DbResult<Vec<PagoDetalle>> {
        let sql = format!(
            "SELECT {PAGO_COLUMNS} FROM pagos WHERE empleado_id = ?1 \
             ORDER BY fecha_pago DESC, created_at DESC"
        );

        let pagos = sqlx::query_as::<_, Pago>(&sql)
            .bind(empleado_id)
            .fetch_all(&self.pool)
            .await?;

        self.with_relations(pagos).await
    }

    async fn with_relations(&self, pagos: Vec<Pago>) -> DbResult<Vec<PagoDetalle>> {
        let empleados =
            empleados_por_id(&self.pool, pagos.iter().map(|p| p.empleado_id.as_str())).await?;
        let registradores = usuarios_por_id(
            &self.pool,
            pagos.iter().map(|p| p.registrado_por_id.as_str()),
        )
        .await?;

        Ok(pagos
            .into_iter()
            .map(|pago| PagoDetalle {
                empleado: empleados.get(&pago.empleado_id).cloned(),
                registrador: registradores.get(&pago.registrado_por_id).cloned(),
                pago,
            })
            .collect())
    }

    /// Records a payment and decrements the employee's hours balance
    /// atomically.
    ///
    /// ## Errors
    /// - `Domain(Validation)` if `horas_pagadas <= 0`
    /// - `NotFound` if the employee doesn't exist
    /// - `Domain(InsufficientHours)` if the balance is smaller than
    ///   `horas_pagadas`; the balance is left unchanged
    pub async fn create_with_balance(&self, pago: &Pago) -> DbResult<Pago> {
        // A non-positive amount would pass the guard and raise the balance.
        validate_positive("horas_pagadas", pago.horas_pagadas).map_err(CoreError::from)?;

        debug!(
            id = %pago.id,
            empleado_id = %pago.empleado_id,
            horas_pagadas = pago.horas_pagadas,
            "Creating pago"
        );

        let mut tx = self.pool.begin().await?;

        let restante: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE empleados
               SET horas_trabajadas = horas_trabajadas - ?1
             WHERE id = ?2 AND horas_trabajadas >= ?1
            RETURNING horas_trabajadas
            "#,
        )
        .bind(pago.horas_pagadas)
        .bind(&pago.empleado_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(restante) = restante else {
            let disponible: Option<i64> =
                sqlx::query_scalar("SELECT horas_trabajadas FROM empleados WHERE id = ?1")
                    .bind(&pago.empleado_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            tx.rollback().await?;

            return Err(match disponible {
                None => DbError::not_found("Empleado", &pago.empleado_id),
                Some(disponible) => match check_hours_balance(disponible, pago.horas_pagadas) {
                    Err(e) => e.into(),
                    // The guard failed, so the check cannot pass under the same lock.
                    Ok(()) => DbError::TransactionFailed(
                        "hours balance changed during payment".to_string(),
                    ),
                },
            });
        };

        sqlx::query(
            r#"
            INSERT INTO pagos (
                id, empleado_id, mes, anio, fecha_pago, monto_pagado, metodo_pago,
                horas_pagadas, observaciones, registrado_por_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&pago.id)
        .bind(&pago.empleado_id)
        .bind(pago.mes)
        .bind(pago.anio)
        .bind(pago.fecha_pago)
        .bind(pago.monto_pagado)
        .bind(&pago.metodo_pago)
        .bind(pago.horas_pagadas)
        .bind(&pago.observaciones)
        .bind(&pago.registrado_por_id)
        .bind(pago.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => {
                DbError::not_found("Usuario", &pago.registrado_por_id)
            }
            other => other,
        })?;

        tx.commit().await?;

        info!(
            id = %pago.id,
            empleado_id = %pago.empleado_id,
            horas_pagadas = pago.horas_pagadas,
            horas_restantes = restante,
            "Pago recorded"
        );

        Ok(pago.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use crate::{Database, DbConfig};
    use nomina_core::{NuevoPago, Rol, ValidationError};

    fn pago(empleado_id: &str, registrado_por: &str, horas: i64) -> Pago {
        NuevoPago {
            empleado_id: Some(empleado_id.to_string()),
            horas_pagadas: Some(horas),
            monto_pagado: Some(horas * 20_000),
            metodo_pago: Some("Transferencia".to_string()),
            ..Default::default()
        }
        .into_pago(registrado_por, fixtures::now())
        .unwrap()
    }

    async fn balance(db: &Database, empleado_id: &str) -> i64 {
        db.empleados()
            .get_by_id(empleado_id)
            .await
            .unwrap()
            .unwrap()
            .horas_trabajadas
    }

    async fn pago_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM pagos")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_successful_payment_decrements_balance() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 160).await;

        let created = db
            .pagos()
            .create_with_balance(&pago(&empleado.id, &admin.id, 40))
            .await
            .unwrap();

        assert_eq!(created.horas_pagadas, 40);
        assert_eq!((created.mes, created.anio), (3, 2025));
        assert_eq!(balance(&db, &empleado.id).await, 120);
        assert_eq!(pago_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_exact_balance_can_be_paid() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 40).await;

        db.pagos()
            .create_with_balance(&pago(&empleado.id, &admin.id, 40))
            .await
            .unwrap();
        assert_eq!(balance(&db, &empleado.id).await, 0);
    }

    #[tokio::test]
    async fn test_insufficient_hours_leaves_balance_unchanged() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 30).await;

        let err = db
            .pagos()
            .create_with_balance(&pago(&empleado.id, &admin.id, 31))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientHours {
                available: 30,
                requested: 31
            })
        ));
        assert_eq!(balance(&db, &empleado.id).await, 30);
        assert_eq!(pago_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_empleado() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;

        let err = db
            .pagos()
            .create_with_balance(&pago("no-existe", &admin.id, 8))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Empleado"));
    }

    #[tokio::test]
    async fn test_failed_insert_rolls_back_decrement() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 50).await;

        // registrado_por_id points nowhere: the INSERT fails after the UPDATE.
        let err = db
            .pagos()
            .create_with_balance(&pago(&empleado.id, "fantasma", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Usuario"));
        assert_eq!(balance(&db, &empleado.id).await, 50);
        assert_eq!(pago_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_non_positive_hours_rejected() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 50).await;

        let mut negativo = pago(&empleado.id, &admin.id, 10);
        negativo.horas_pagadas = -10;

        let err = db.pagos().create_with_balance(&negativo).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert_eq!(balance(&db, &empleado.id).await, 50);
    }

    #[tokio::test]
    async fn test_list_by_empleado() {
        let db = fixtures::db().await;
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let a = fixtures::empleado(&db, &admin, 100).await;
        let b = fixtures::empleado(&db, &admin, 100).await;

        db.pagos().create_with_balance(&pago(&a.id, &admin.id, 10)).await.unwrap();
        db.pagos().create_with_balance(&pago(&a.id, &admin.id, 20)).await.unwrap();
        db.pagos().create_with_balance(&pago(&b.id, &admin.id, 5)).await.unwrap();

        let todos = db.pagos().list_with_relations().await.unwrap();
        assert_eq!(todos.len(), 3);
        assert!(todos.iter().all(|p| p.registrador.is_some()));

        let de_a = db.pagos().list_by_empleado_with_relations(&a.id).await.unwrap();
        assert_eq!(de_a.len(), 2);
        assert!(de_a.iter().all(|p| p.empleado.as_ref().map(|e| &e.id) == Some(&a.id)));
        // Embedded employee reflects the current balance.
        assert_eq!(de_a[0].empleado.as_ref().unwrap().horas_trabajadas, 70);

        let ninguno = db.pagos().list_by_empleado_with_relations("no-existe").await.unwrap();
        assert!(ninguno.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_payments_never_overdraw() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("nomina.db")).max_connections(8))
            .await
            .unwrap();
        let admin = fixtures::usuario(&db, "admin@empresa.co", Rol::Admin).await;
        let empleado = fixtures::empleado(&db, &admin, 100).await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let db = db.clone();
            let pago = pago(&empleado.id, &admin.id, 30);
            handles.push(tokio::spawn(async move {
                db.pagos().create_with_balance(&pago).await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DbError::Domain(CoreError::InsufficientHours { .. })) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        // floor(100 / 30) payments fit.
        assert_eq!(ok, 3);
        assert_eq!(balance(&db, &empleado.id).await, 10);
        assert_eq!(pago_count(&db).await, 3);
    }
}
