//! Middleware de autenticación de sesión
//!
//! Este módulo maneja la verificación del token de sesión (cookie
//! HTTP-only o header Authorization) y la inyección del usuario
//! autenticado en las requests.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{
    extract_token_from_cookie, extract_token_from_header, verify_session_token, JwtConfig,
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// Middleware de autenticación de sesión.
/// El token viaja en la cookie "session" o en el header Authorization.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&request).ok_or_else(|| {
        AppError::Unauthorized("Se requiere una sesión activa".to_string())
    })?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_session_token(&token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Sesión inválida o expirada".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Sesión inválida".to_string()))?;

    // Verificar contra la base: el usuario existe y no está suspendido
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !user.active {
        return Err(AppError::Forbidden("Cuenta suspendida".to_string()));
    }

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Middleware para rutas exclusivas de brokers (y admins)
pub async fn broker_only_middleware(
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Broker && user.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Solo los brokers pueden acceder a este recurso".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Middleware para rutas exclusivas de dispatchers (y admins)
pub async fn dispatcher_only_middleware(
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Dispatcher && user.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Solo los dispatchers pueden acceder a este recurso".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

fn session_token(request: &Request) -> Option<String> {
    // Primero la cookie de sesión, después el header Authorization
    if let Some(cookie_header) = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = extract_token_from_cookie(cookie_header) {
            return Some(token.to_string());
        }
    }

    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| extract_token_from_header(v).ok())
        .map(|t| t.to_string())
}
