//! Middleware de secretos server-to-server
//!
//! Las rutas geo se consumen desde el backend del frontend con un secreto
//! compartido, y las rutas de cron con otro. Ninguna de las dos acepta
//! sesiones de usuario.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::errors::AppError;

const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";
const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Gate de las rutas geo: header x-internal-secret
pub async fn internal_secret_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_secret(
        &request,
        INTERNAL_SECRET_HEADER,
        &state.config.internal_api_secret,
    )?;
    Ok(next.run(request).await)
}

/// Gate de las rutas de cron: header x-cron-secret
pub async fn cron_secret_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_secret(&request, CRON_SECRET_HEADER, &state.config.cron_secret)?;
    Ok(next.run(request).await)
}

fn check_secret(request: &Request, header: &str, expected: &str) -> Result<(), AppError> {
    let provided = request
        .headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("Falta el header {}", header)))?;

    if provided != expected {
        return Err(AppError::Unauthorized("Secreto inválido".to_string()));
    }

    Ok(())
}
