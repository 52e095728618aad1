//! Login and registration.
//!
//! Argon2 is deliberately slow, so hashing and verification run on the
//! blocking pool rather than on the async workers.

use std::sync::Arc;

use chrono::Utc;

use nomina_core::{Credenciales, NuevoUsuario, Rol, UsuarioPublico};
use nomina_db::Database;

use super::jwt::JwtManager;
use super::password::{hash_password, verify_password};
use super::CurrentUser;
use crate::error::{ApiError, ApiResult};

/// Stands in for the stored hash when the email is unknown.
const DUMMY_PASSWORD: &str = "nomina-dummy-password";

/// Account operations that need both the database and the token manager.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    jwt: Arc<JwtManager>,
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(
        db: Database,
        jwt: Arc<JwtManager>,
    ) -> Result<Self, argon2::password_hash::Error> {
        let dummy_hash = hash_password(DUMMY_PASSWORD)?;
        Ok(AuthService {
            db,
            jwt,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Exchange credentials for a token.
    ///
    /// Unknown email and wrong password both return
    /// [`ApiError::invalid_credentials`].
    pub async fn login(&self, credenciales: &Credenciales) -> ApiResult<String> {
        let (correo, contrasena) = credenciales.validate()?;

        let usuario = self.db.usuarios().get_by_correo(&correo).await?;

        let stored_hash = match &usuario {
            Some(u) => u.contrasena.clone(),
            None => self.dummy_hash.to_string(),
        };
        let contrasena = contrasena.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&contrasena, &stored_hash))
            .await
            .map_err(ApiError::internal)?;

        let usuario = match usuario {
            Some(u) if verified => u,
            _ => {
                tracing::warn!(correo = %correo, "Failed login attempt");
                return Err(ApiError::invalid_credentials());
            }
        };

        let usuario = UsuarioPublico::from(usuario);
        let token = self
            .jwt
            .generate_token(&usuario)
            .map_err(ApiError::internal)?;

        tracing::info!(user_id = %usuario.id, rol = %usuario.rol, "User logged in");
        Ok(token)
    }

    /// Create an account.
    ///
    /// The requested `rol` is honoured only when `caller` is an admin;
    /// everyone else gets [`Rol::User`].
    pub async fn register(
        &self,
        input: NuevoUsuario,
        caller: Option<&CurrentUser>,
    ) -> ApiResult<UsuarioPublico> {
        input.validate()?;

        let caller_is_admin = caller.is_some_and(|c| c.rol.is_admin());
        let rol = if caller_is_admin {
            input.rol.unwrap_or_default()
        } else {
            if input.rol == Some(Rol::Admin) {
                tracing::warn!("Non-admin registration requested ADMIN role; downgraded to USER");
            }
            Rol::User
        };

        let contrasena = input.contrasena.clone().unwrap_or_default();
        let hash = tokio::task::spawn_blocking(move || hash_password(&contrasena))
            .await
            .map_err(ApiError::internal)?
            .map_err(ApiError::internal)?;

        let usuario = input.into_usuario(hash, rol, Utc::now())?;
        let creado = self.db.usuarios().insert(&usuario).await?;

        tracing::info!(user_id = %creado.id, rol = %creado.rol, "User registered");
        Ok(creado)
    }
}
