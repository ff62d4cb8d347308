use axum::{
    extract::{Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::message_controller::MessageController;
use crate::dto::common::ApiResponse;
use crate::dto::message_dto::{CreateMessageRequest, MarkReadRequest, MessageQuery, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_message_router() -> Router<AppState> {
    Router::new()
        // POST crea, GET lista por load, PATCH es el mark-read en bulk
        .route(
            "/",
            post(send_message).get(list_messages).patch(mark_read),
        )
}

async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    let response = controller.send(&user, request).await?;
    Ok(Json(response))
}

async fn list_messages(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    let response = controller.mark_read(&user, request.load_id).await?;
    Ok(Json(response))
}
