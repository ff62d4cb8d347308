//! Ensamblado del router de la API
//!
//! Cada recurso tiene su router; acá se nestean bajo /api y se aplican
//! las capas de autenticación que correspondan.

pub mod auth_routes;
pub mod billing_routes;
pub mod cron_routes;
pub mod driver_routes;
pub mod geo_routes;
pub mod load_routes;
pub mod message_routes;
pub mod request_routes;
pub mod truck_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::auth::auth_middleware;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Router del health check, sin estado ni autenticación
pub fn create_health_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health", get(health_endpoint))
}

async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "freight_board",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Router completo de /api
pub fn create_api_router(state: AppState, limiter: RateLimitState) -> Router<AppState> {
    // Los boards de loads y trucks requieren sesión para mutar; el resto
    // de los recursos también viaja detrás del login
    let session_routes = Router::new()
        .nest("/loads", load_routes::create_load_router())
        .nest("/messages", message_routes::create_message_router())
        .nest("/trucks", truck_routes::create_truck_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Los endpoints de credenciales van con la mitad del cupo de rate limit
    let auth_router = auth_routes::create_auth_router(state.clone()).route_layer(
        middleware::from_fn_with_state(limiter.strict(), rate_limit_middleware),
    );

    Router::new()
        .merge(session_routes)
        .nest("/requests", request_routes::create_request_router(state.clone()))
        .nest("/auth", auth_router)
        .merge(driver_routes::create_driver_router(state.clone()))
        .merge(billing_routes::create_billing_router(state.clone()))
        .nest("/here", geo_routes::create_geo_router(state.clone()))
        .nest("/cron", cron_routes::create_cron_router(state))
        .route_layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
}
