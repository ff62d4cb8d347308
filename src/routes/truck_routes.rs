use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::controllers::truck_controller::TruckController;
use crate::dto::common::ApiResponse;
use crate::dto::truck_dto::{CreateTruckRequest, HireTruckRequest, TruckQuery, TruckResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_truck_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_truck))
        .route("/", get(list_trucks))
        .route("/:id", get(get_truck))
        .route("/:id", delete(delete_truck))
        .route("/:id/hire", post(hire_truck))
}

async fn create_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateTruckRequest>,
) -> Result<Json<ApiResponse<TruckResponse>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_trucks(
    State(state): State<AppState>,
    Query(query): Query<TruckQuery>,
) -> Result<Json<Vec<TruckResponse>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TruckResponse>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn hire_truck(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<HireTruckRequest>,
) -> Result<Json<ApiResponse<TruckResponse>>, AppError> {
    let booking = BookingController::new(state.pool.clone(), state.mailer.clone());
    let truck = booking.hire_truck(id, request.load_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        TruckResponse::from(truck),
        "Truck contratado".to_string(),
    )))
}

async fn delete_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = BookingController::new(state.pool.clone(), state.mailer.clone());
    booking.delete_posted_truck(id, &user).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Truck eliminado exitosamente"
    })))
}
