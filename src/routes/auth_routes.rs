use axum::{
    extract::State,
    http::header::SET_COOKIE,
    middleware,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SendOtpRequest, SignupRequest,
    UserResponse, VerifyOtpRequest,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(
        state.pool.clone(),
        state.mailer.clone(),
        state.billing.clone(),
        state.config.clone(),
    )
}

/// Cookie de sesión HTTP-only
fn session_cookie(token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "session={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let response = controller(&state).signup(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = controller(&state).login(request).await?;

    let cookie = session_cookie(
        &token,
        state.config.jwt_expiration,
        state.config.is_production(),
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(ApiResponse::success_with_message(
            user,
            "Login exitoso".to_string(),
        )),
    ))
}

async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = session_cookie("", 0, state.config.is_production());
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(serde_json::json!({
            "success": true,
            "message": "Sesión cerrada"
        })),
    )
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let response = controller(&state).me(&user).await?;
    Ok(Json(response))
}

async fn send_otp(
    State(state): State<AppState>,
    Json(request): Json<SendOtpRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).send_otp(request).await?;
    Ok(Json(response))
}

async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).verify_otp(request).await?;
    Ok(Json(response))
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).forgot_password(request).await?;
    Ok(Json(response))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).reset_password(request).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("abc.def", 3600, false);
        assert!(cookie.starts_with("session=abc.def"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie("abc.def", 3600, true);
        assert!(secure.ends_with("; Secure"));
    }
}
