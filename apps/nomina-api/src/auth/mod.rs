//! # Authentication
//!
//! ```text
//! ┌──────────────┐   login    ┌──────────────┐  argon2 verify  ┌──────────┐
//! │   Frontend   │───────────►│ AuthService  │────────────────►│ usuarios │
//! │              │◄───────────│              │                 └──────────┘
//! │              │  { token } │  JwtManager  │
//! │              │            └──────────────┘
//! │              │  Bearer    ┌──────────────┐
//! │              │───────────►│ require_auth │──► CurrentUser ──► handlers
//! └──────────────┘            └──────────────┘
//! ```
//!
//! - [`password`] - argon2 hashing
//! - [`jwt`] - token issue / validation
//! - [`middleware`] - `require_auth`, `require_admin`
//! - [`service`] - login and registration

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use nomina_core::Rol;

use crate::error::ApiError;
use crate::AppState;

pub use jwt::{extract_bearer_token, Claims, JwtError, JwtManager};
pub use middleware::{require_admin, require_auth};
pub use service::AuthService;

/// The authenticated caller, taken from the token claims.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub correo: String,
    pub rol: Rol,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        CurrentUser {
            id: claims.sub,
            correo: claims.correo,
            rol: claims.rol,
        }
    }
}

/// Reads the user injected by [`require_auth`].
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Caller identity on public routes.
///
/// A missing or invalid token yields `None` instead of a 401.
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Some(user.clone()));
        }

        let user = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer_token)
            .and_then(|token| state.jwt.validate_token(token).ok())
            .map(CurrentUser::from);

        Ok(user)
    }
}
