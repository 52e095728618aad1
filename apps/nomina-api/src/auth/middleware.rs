//! Authentication middleware.
//!
//! ## Request Flow
//! ```text
//! request ──► require_auth ──────────────► require_admin ──► handler
//!               │ Authorization: Bearer …     │ CurrentUser.rol
//!               │                             │
//!               ├── missing header ──► 401    └── not ADMIN ──► 403
//!               ├── not "Bearer " ───► 401
//!               ├── bad signature ───► 401
//!               ├── expired ─────────► 401
//!               └── ok: extensions.insert(CurrentUser)
//! ```
//!
//! Every token failure produces the same [`ApiError::unauthorized`] body.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::jwt::extract_bearer_token;
use super::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Validates the bearer token and injects [`CurrentUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = header.and_then(extract_bearer_token) else {
        tracing::warn!(uri = %req.uri(), "Missing or malformed authorization header");
        return Err(ApiError::unauthorized());
    };

    let claims = state.jwt.validate_token(token).map_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Rejected bearer token");
        ApiError::unauthorized()
    })?;

    let user = CurrentUser::from(claims);
    tracing::debug!(user_id = %user.id, rol = %user.rol, "Authenticated request");

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Rejects non-admin callers. Must run after [`require_auth`].
pub async fn require_admin(
    user: CurrentUser,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.rol.is_admin() {
        tracing::warn!(user_id = %user.id, uri = %req.uri(), "Admin route denied");
        return Err(ApiError::forbidden("Admin role required"));
    }

    Ok(next.run(req).await)
}
