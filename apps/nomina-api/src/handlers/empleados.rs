//! Employee master data.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use nomina_core::{Empleado, EmpleadoDetalle, NuevoEmpleado};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// `GET /empleados`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmpleadoDetalle>>> {
    Ok(Json(state.db.empleados().list_with_creador().await?))
}

/// `POST /empleados`
///
/// `creado_por` defaults to the caller.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<NuevoEmpleado>,
) -> ApiResult<(StatusCode, Json<Empleado>)> {
    let empleado = input.into_empleado(&user.id, Utc::now())?;
    let empleado = state.db.empleados().insert(&empleado).await?;

    tracing::info!(empleado_id = %empleado.id, user_id = %user.id, "Empleado created");
    Ok((StatusCode::CREATED, Json(empleado)))
}
