use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{DriverResponse, InviteDriverRequest, OnboardingRequest};
use crate::middleware::auth::{auth_middleware, dispatcher_only_middleware, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/invite", post(invite_driver))
        .route("/drivers", get(list_drivers))
        .route_layer(middleware::from_fn(dispatcher_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        // El onboarding es público: el driver todavía no tiene cuenta
        .route("/onboarding", post(onboard_driver))
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(
        state.pool.clone(),
        state.mailer.clone(),
        state.config.clone(),
    )
}

async fn invite_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<InviteDriverRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).invite(&user, request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let response = controller(&state).list(&user).await?;
    Ok(Json(response))
}

async fn onboard_driver(
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let response = controller(&state).onboard(request).await?;
    Ok(Json(response))
}
