//! Account administration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use nomina_core::{ActualizarRol, NuevoUsuario, UsuarioPublico};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// `GET /usuarios` (admin)
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<UsuarioPublico>>> {
    Ok(Json(state.db.usuarios().list().await?))
}

/// `POST /usuarios` (public registration)
///
/// Only an authenticated admin can create another admin.
pub async fn create(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    ApiJson(input): ApiJson<NuevoUsuario>,
) -> ApiResult<(StatusCode, Json<UsuarioPublico>)> {
    let usuario = state.auth.register(input, caller.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

/// `PUT /usuarios` (admin), body `{ id, rol }`
pub async fn update_rol(
    State(state): State<AppState>,
    admin: CurrentUser,
    ApiJson(input): ApiJson<ActualizarRol>,
) -> ApiResult<Json<UsuarioPublico>> {
    let (id, rol) = input.validate()?;
    let usuario = state.db.usuarios().update_rol(id, rol).await?;

    tracing::info!(user_id = %usuario.id, rol = %usuario.rol, by = %admin.id, "Role updated");
    Ok(Json(usuario))
}
