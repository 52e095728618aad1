//! # Usuario Repository
//!
//! Login accounts. The stored `contrasena` is always an argon2 hash
//! produced by the API layer; this repository never sees plaintext.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::USUARIO_PUBLICO_COLUMNS;
use nomina_core::{Rol, Usuario, UsuarioPublico};

const USUARIO_COLUMNS: &str = "id, nombre, correo, contrasena, rol, created_at";

/// Repository for usuario database operations.
#[derive(Debug, Clone)]
pub struct UsuarioRepository {
    pool: SqlitePool,
}

impl UsuarioRepository {
    /// Creates a new UsuarioRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UsuarioRepository { pool }
    }

    /// Lists every account, oldest first. Hashes are not selected.
    pub async fn list(&self) -> DbResult<Vec<UsuarioPublico>> {
        let sql = format!("SELECT {USUARIO_PUBLICO_COLUMNS} FROM usuarios ORDER BY created_at, id");

        let usuarios = sqlx::query_as::<_, UsuarioPublico>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(usuarios)
    }

    /// Gets an account by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Usuario>> {
        let sql = format!("SELECT {USUARIO_COLUMNS} FROM usuarios WHERE id = ?1");

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    /// Gets an account by email (case-insensitive, emails are stored lowercased).
    pub async fn get_by_correo(&self, correo: &str) -> DbResult<Option<Usuario>> {
        let sql = format!("SELECT {USUARIO_COLUMNS} FROM usuarios WHERE correo = ?1");

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(nomina_core::normalize_correo(correo))
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    /// Inserts an account.
    ///
    /// ## Errors
    /// `UniqueViolation` if the email is already registered.
    pub async fn insert(&self, usuario: &Usuario) -> DbResult<UsuarioPublico> {
        debug!(id = %usuario.id, rol = %usuario.rol, "Inserting usuario");

        sqlx::query(
            r#"
            INSERT INTO usuarios (id, nombre, correo, contrasena, rol, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&usuario.id)
        .bind(&usuario.nombre)
        .bind(&usuario.correo)
        .bind(&usuario.contrasena)
        .bind(usuario.rol)
        .bind(usuario.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("correo", &usuario.correo),
            other => other,
        })?;

        Ok(UsuarioPublico::from(usuario.clone()))
    }

    /// Changes an account's role.
    ///
    /// ## Errors
    /// `NotFound` if no account has this id.
    pub async fn update_rol(&self, id: &str, rol: Rol) -> DbResult<UsuarioPublico> {
        debug!(id = %id, rol = %rol, "Updating usuario rol");

        let result = sqlx::query("UPDATE usuarios SET rol = ?2 WHERE id = ?1")
            .bind(id)
            .bind(rol)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Usuario", id));
        }

        self.get_by_id(id)
            .await?
            .map(UsuarioPublico::from)
            .ok_or_else(|| DbError::not_found("Usuario", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = fixtures::db().await;
        let usuario = fixtures::usuario(&db, "ana@empresa.co", Rol::User).await;

        let found = db
            .usuarios()
            .get_by_correo("ANA@Empresa.co")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, usuario.id);
        assert_eq!(found.rol, Rol::User);
        assert_eq!(found.contrasena, "$argon2id$fixture");

        let by_id = db.usuarios().get_by_id(&usuario.id).await.unwrap();
        assert!(by_id.is_some());
        assert!(db.usuarios().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_correo() {
        let db = fixtures::db().await;
        let first = fixtures::usuario(&db, "ana@empresa.co", Rol::User).await;

        let mut second = first.clone();
        second.id = "otro-id".to_string();
        let err = db.usuarios().insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "correo"));
    }

    #[tokio::test]
    async fn test_update_rol() {
        let db = fixtures::db().await;
        let usuario = fixtures::usuario(&db, "ana@empresa.co", Rol::User).await;

        let updated = db.usuarios().update_rol(&usuario.id, Rol::Admin).await.unwrap();
        assert_eq!(updated.rol, Rol::Admin);
        let stored = db.usuarios().get_by_id(&usuario.id).await.unwrap().unwrap();
        assert_eq!(stored.rol, Rol::Admin);

        let err = db.usuarios().update_rol("missing", Rol::Admin).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_has_no_hashes() {
        let db = fixtures::db().await;
        fixtures::usuario(&db, "a@empresa.co", Rol::Admin).await;
        fixtures::usuario(&db, "b@empresa.co", Rol::User).await;

        let usuarios = db.usuarios().list().await.unwrap();
        assert_eq!(usuarios.len(), 2);
        let json = serde_json::to_string(&usuarios).unwrap();
        assert!(!json.contains("argon2"));
    }
}
