//! Employment contracts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use nomina_core::{Contrato, ContratoDetalle, NuevoContrato};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// `GET /contratos`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ContratoDetalle>>> {
    Ok(Json(state.db.contratos().list_with_empleado().await?))
}

/// `POST /contratos`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<NuevoContrato>,
) -> ApiResult<(StatusCode, Json<Contrato>)> {
    let contrato = input.into_contrato(&user.id, Utc::now())?;
    let contrato = state.db.contratos().insert(&contrato).await?;

    tracing::info!(
        contrato_id = %contrato.id,
        empleado_id = %contrato.empleado_id,
        "Contrato created"
    );
    Ok((StatusCode::CREATED, Json(contrato)))
}
