//! Sick-leave records.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use nomina_core::{Incapacidad, IncapacidadDetalle, NuevaIncapacidad};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// `GET /incapacidades`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<IncapacidadDetalle>>> {
    Ok(Json(state.db.incapacidades().list_with_relations().await?))
}

/// `POST /incapacidades`
///
/// Every field is required, `registrado_por` included.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NuevaIncapacidad>,
) -> ApiResult<(StatusCode, Json<Incapacidad>)> {
    let incapacidad = input.into_incapacidad(Utc::now())?;
    let incapacidad = state.db.incapacidades().insert(&incapacidad).await?;

    tracing::info!(
        incapacidad_id = %incapacidad.id,
        empleado_id = %incapacidad.empleado_id,
        dias = incapacidad.dias_incapacidad,
        "Incapacidad registered"
    );
    Ok((StatusCode::CREATED, Json(incapacidad)))
}
