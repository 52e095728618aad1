//! Payroll payments.
//!
//! ```text
//! POST /pagos { empleado_id, horas_pagadas, ... }
//!     │
//!     ├── validate ───────────────────────► 400 VALIDATION_ERROR
//!     ├── registrado_por_id = token subject
//!     └── PagoRepository::create_with_balance (one transaction)
//!             ├── unknown empleado ───────► 404 NOT_FOUND
//!             ├── horas > balance ────────► 400 INSUFFICIENT_HOURS
//!             └── balance -= horas, insert ► 201 pago
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use nomina_core::{NuevoPago, Pago, PagoDetalle};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// `GET /pagos`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PagoDetalle>>> {
    Ok(Json(state.db.pagos().list_with_relations().await?))
}

/// `GET /pagos/{empleado_id}`
///
/// An unknown employee yields an empty list.
pub async fn list_by_empleado(
    State(state): State<AppState>,
    Path(empleado_id): Path<String>,
) -> ApiResult<Json<Vec<PagoDetalle>>> {
    Ok(Json(
        state
            .db
            .pagos()
            .list_by_empleado_with_relations(&empleado_id)
            .await?,
    ))
}

/// `POST /pagos`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<NuevoPago>,
) -> ApiResult<(StatusCode, Json<Pago>)> {
    let pago = input.into_pago(&user.id, Utc::now())?;
    let pago = state.db.pagos().create_with_balance(&pago).await?;

    tracing::info!(
        pago_id = %pago.id,
        empleado_id = %pago.empleado_id,
        horas = pago.horas_pagadas,
        user_id = %user.id,
        "Pago registered"
    );
    Ok((StatusCode::CREATED, Json(pago)))
}
