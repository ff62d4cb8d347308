use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::common::ApiResponse;
use crate::dto::request_dto::{
    CreateLoadRequestDto, LoadRequestQuery, LoadRequestResponse, UpdateLoadRequestDto,
};
use crate::middleware::auth::{auth_middleware, AuthUser};
use crate::middleware::internal::internal_secret_middleware;
use crate::models::load_request::RequestStatus;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_request_router(state: AppState) -> Router<AppState> {
    let session_routes = Router::new()
        .route("/", post(submit_request))
        .route("/:id", get(get_request))
        .route("/:id", patch(update_request))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // El listado es server-to-server y viaja con el secreto interno
    let internal_routes = Router::new()
        .route("/", get(list_requests))
        .route_layer(middleware::from_fn_with_state(
            state,
            internal_secret_middleware,
        ));

    session_routes.merge(internal_routes)
}

async fn submit_request(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Json(request): Json<CreateLoadRequestDto>,
) -> Result<Json<ApiResponse<LoadRequestResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.mailer.clone());
    let created = controller.submit_request(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        LoadRequestResponse::from(created),
        "Request enviado al broker".to_string(),
    )))
}

async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<LoadRequestQuery>,
) -> Result<Json<Vec<LoadRequestResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.mailer.clone());
    let requests = controller.list_requests(query).await?;
    Ok(Json(
        requests.into_iter().map(LoadRequestResponse::from).collect(),
    ))
}

async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LoadRequestResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.mailer.clone());
    let request = controller.get_request(id).await?;
    Ok(Json(LoadRequestResponse::from(request)))
}

/// PATCH de request: la única mutación es status → accepted | declined
async fn update_request(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLoadRequestDto>,
) -> Result<Json<ApiResponse<LoadRequestResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.mailer.clone());

    let (updated, message) = match request.status {
        RequestStatus::Accepted => (
            controller.accept_request(id, &user).await?,
            "Request aceptado",
        ),
        RequestStatus::Declined => (
            controller.decline_request(id, &user).await?,
            "Request declinado",
        ),
        RequestStatus::Pending => {
            return Err(AppError::BadRequest(
                "status can only be patched to accepted or declined".to_string(),
            ));
        }
    };

    Ok(Json(ApiResponse::success_with_message(
        LoadRequestResponse::from(updated),
        message.to_string(),
    )))
}
