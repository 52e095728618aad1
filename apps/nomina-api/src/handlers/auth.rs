//! Login endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use nomina_core::Credenciales;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /auth` and `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credenciales): ApiJson<Credenciales>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.auth.login(&credenciales).await?;
    Ok(Json(TokenResponse { token }))
}
