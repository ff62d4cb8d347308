use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::controllers::load_controller::LoadController;
use crate::dto::common::ApiResponse;
use crate::dto::load_dto::{CreateLoadRequest, LoadResponse, UpdateLoadRequest};
use crate::dto::request_dto::LoadRequestResponse;
use crate::middleware::auth::{broker_only_middleware, AuthUser};
use crate::models::load::{LoadFilters, LoadStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_load_router() -> Router<AppState> {
    Router::new()
        // Solo los brokers publican loads; buscar es para todos
        .route(
            "/",
            post(create_load)
                .route_layer(middleware::from_fn(broker_only_middleware))
                .get(list_loads),
        )
        .route("/:id", get(get_load))
        .route("/:id", patch(update_load))
        .route("/:id", delete(delete_load))
        .route("/:id/requests", get(list_load_requests))
}

async fn create_load(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateLoadRequest>,
) -> Result<Json<ApiResponse<LoadResponse>>, AppError> {
    let controller = LoadController::new(state.pool.clone(), state.geo.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_loads(
    State(state): State<AppState>,
    Query(filters): Query<LoadFilters>,
) -> Result<Json<Vec<LoadResponse>>, AppError> {
    let controller = LoadController::new(state.pool.clone(), state.geo.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_load(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LoadResponse>, AppError> {
    let controller = LoadController::new(state.pool.clone(), state.geo.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

/// PATCH de load. status=canceled dispara el flujo de cancelación con
/// notificaciones; cualquier otro campo es una edición normal.
async fn update_load(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLoadRequest>,
) -> Result<Json<ApiResponse<LoadResponse>>, AppError> {
    if request.status == Some(LoadStatus::Canceled) {
        let booking = BookingController::new(state.pool.clone(), state.mailer.clone());
        let load = booking.cancel_load(id, &user).await?;
        return Ok(Json(ApiResponse::success_with_message(
            LoadResponse::from(load),
            "Load cancelado".to_string(),
        )));
    }

    let controller = LoadController::new(state.pool.clone(), state.geo.clone());
    let response = controller.update(id, &user, request).await?;
    Ok(Json(response))
}

async fn delete_load(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = BookingController::new(state.pool.clone(), state.mailer.clone());
    booking.delete_load(id, &user).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Load eliminado exitosamente"
    })))
}

async fn list_load_requests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LoadRequestResponse>>, AppError> {
    let booking = BookingController::new(state.pool.clone(), state.mailer.clone());
    let requests = booking
        .list_requests(crate::dto::request_dto::LoadRequestQuery {
            load_id: Some(id),
            status: None,
        })
        .await?;
    Ok(Json(
        requests.into_iter().map(LoadRequestResponse::from).collect(),
    ))
}
