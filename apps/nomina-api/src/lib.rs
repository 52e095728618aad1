//! # Nómina API
//!
//! HTTP JSON server for the payroll service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          nomina-api                                     │
//! │                                                                         │
//! │  Frontend ──► CorsLayer ──► TraceLayer ──► Router                       │
//! │                                              │                          │
//! │                        ┌─────────────────────┼──────────────────────┐   │
//! │                        ▼                     ▼                      ▼   │
//! │                     public          require_auth          require_auth  │
//! │                  /health /auth      /empleados ...        require_admin │
//! │                  POST /usuarios     /pagos                /usuarios     │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                   nomina-db (SQLite pool)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]. Environment variables:
//! - `HTTP_HOST` / `HTTP_PORT` - listen address (default: 0.0.0.0:4000)
//! - `DATABASE_PATH` - SQLite file (default: ./data/nomina.db)
//! - `JWT_SECRET` - HS256 signing secret
//! - `JWT_EXPIRY_SECS` - token lifetime (default: 7200)
//! - `CORS_ALLOW_ORIGIN` - allowed origin (default: any)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use nomina_db::Database;

pub use auth::{AuthService, CurrentUser, JwtManager};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
///
/// Cheap to clone: every field is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub auth: AuthService,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Wire the services around an open database.
    pub fn new(db: Database, config: ApiConfig) -> Result<Self, argon2::password_hash::Error> {
        let jwt = Arc::new(JwtManager::new(&config.jwt_secret, config.jwt_expiry_secs));
        let auth = AuthService::new(db.clone(), jwt.clone())?;

        Ok(AppState {
            db,
            jwt,
            auth,
            config: Arc::new(config),
        })
    }
}

/// Build the application router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_allow_origin.as_deref());

    handlers::routes(&state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin {
        None | Some("*") => AllowOrigin::any(),
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(%origin, "Invalid CORS_ALLOW_ORIGIN, allowing any origin");
                AllowOrigin::any()
            }
        },
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nomina=debug,sqlx=warn,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
