//! Controller de trucks publicados
//!
//! Publicación y búsqueda del board de capacidad. La contratación y el
//! borrado pasan por el controller de booking.

use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::truck_dto::{CreateTruckRequest, TruckQuery, TruckResponse};
use crate::middleware::auth::AuthUser;
use crate::models::posted_truck::PostedTruckFilters;
use crate::repositories::truck_repository::{NewPostedTruck, TruckRepository};
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_mc_number, validate_phone};

pub struct TruckController {
    repository: TruckRepository,
}

impl TruckController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: TruckRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthUser,
        request: CreateTruckRequest,
    ) -> Result<ApiResponse<TruckResponse>, AppError> {
        request.validate()?;
        validate_phone(&request.phone)
            .map_err(|_| AppError::BadRequest("phone is not a valid phone number".to_string()))?;
        validate_mc_number(&request.mc_number)
            .map_err(|_| AppError::BadRequest("mc_number has an invalid format".to_string()))?;

        let truck = self
            .repository
            .create(NewPostedTruck {
                driver_name: request.driver_name,
                phone: request.phone,
                email: request.email,
                mc_number: request.mc_number,
                equipment_type: request.equipment_type,
                max_weight_lbs: request.max_weight_lbs,
                current_location: request.current_location,
                available_date: request.available_date,
                available_time: request.available_time,
                notes: request.notes,
                posted_by_id: caller.id,
                posted_by_role: caller.role,
            })
            .await?;

        tracing::info!("🚛 Truck {} publicado por {}", truck.id, caller.id);

        Ok(ApiResponse::success_with_message(
            TruckResponse::from(truck),
            "Truck publicado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TruckResponse, AppError> {
        let truck = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Posted truck not found".to_string()))?;

        Ok(TruckResponse::from(truck))
    }

    pub async fn list(&self, query: TruckQuery) -> Result<Vec<TruckResponse>, AppError> {
        let trucks = self
            .repository
            .list(PostedTruckFilters {
                status: query.status,
                equipment_type: query.equipment_type,
                posted_by_id: None,
                location: query.location,
            })
            .await?;

        Ok(trucks.into_iter().map(TruckResponse::from).collect())
    }
}
