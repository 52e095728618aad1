//! # HTTP Handlers
//!
//! ## Route Table
//! ```text
//! ┌────────┬─────────────────────────┬──────────────────┐
//! │ Method │ Path                    │ Guard            │
//! ├────────┼─────────────────────────┼──────────────────┤
//! │ GET    │ /health                 │ public           │
//! │ POST   │ /auth, /auth/login      │ public           │
//! │ POST   │ /usuarios               │ public           │
//! │ GET    │ /empleados              │ bearer           │
//! │ POST   │ /empleados              │ bearer           │
//! │ GET    │ /contratos              │ bearer           │
//! │ POST   │ /contratos              │ bearer           │
//! │ GET    │ /incapacidades          │ bearer           │
//! │ POST   │ /incapacidades          │ bearer           │
//! │ GET    │ /pagos                  │ bearer           │
//! │ GET    │ /pagos/{empleado_id}    │ bearer           │
//! │ POST   │ /pagos                  │ bearer           │
//! │ GET    │ /usuarios               │ bearer + ADMIN   │
//! │ PUT    │ /usuarios               │ bearer + ADMIN   │
//! └────────┴─────────────────────────┴──────────────────┘
//! ```

pub mod auth;
pub mod contratos;
pub mod empleados;
pub mod health;
pub mod incapacidades;
pub mod pagos;
pub mod usuarios;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::{require_admin, require_auth};
use crate::AppState;

/// All routes, with the auth guards attached. State is supplied by the caller.
pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/auth", post(auth::login))
        .route("/auth/login", post(auth::login))
        .route("/usuarios", post(usuarios::create));

    let protected = Router::new()
        .route("/empleados", get(empleados::list).post(empleados::create))
        .route("/contratos", get(contratos::list).post(contratos::create))
        .route(
            "/incapacidades",
            get(incapacidades::list).post(incapacidades::create),
        )
        .route("/pagos", get(pagos::list).post(pagos::create))
        .route("/pagos/{empleado_id}", get(pagos::list_by_empleado))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // route_layer order: the last one added runs first
    let admin = Router::new()
        .route("/usuarios", get(usuarios::list).put(usuarios::update_rol))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(protected).merge(admin)
}
