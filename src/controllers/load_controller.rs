//! Controller de loads
//!
//! Publicación, búsqueda y edición de campos no-estado. Todo cambio de
//! Load.status pasa por el controller de booking; acá solo se detecta el
//! PATCH con status=canceled y se delega.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::load_dto::{CreateLoadRequest, LoadResponse, UpdateLoadRequest};
use crate::middleware::auth::AuthUser;
use crate::models::load::{LoadFilters, LoadStatus};
use crate::models::user::User;
use crate::repositories::load_repository::{LoadRepository, NewLoad};
use crate::repositories::user_repository::UserRepository;
use crate::services::geo_service::GeoService;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_state_code;

pub struct LoadController {
    repository: LoadRepository,
    users: UserRepository,
    geo: Option<Arc<GeoService>>,
}

impl LoadController {
    pub fn new(pool: sqlx::PgPool, geo: Option<Arc<GeoService>>) -> Self {
        Self {
            repository: LoadRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            geo,
        }
    }

    /// Publicar un load. El broker que postea queda snapshoteado en la
    /// fila (nombre y MC) para que el board no haga joins por request.
    pub async fn create(
        &self,
        caller: &AuthUser,
        request: CreateLoadRequest,
    ) -> Result<ApiResponse<LoadResponse>, AppError> {
        request.validate()?;
        validate_state_code(&request.pickup_state).map_err(|_| {
            AppError::BadRequest("pickup_state must be a two-letter state code".to_string())
        })?;
        validate_state_code(&request.dropoff_state).map_err(|_| {
            AppError::BadRequest("dropoff_state must be a two-letter state code".to_string())
        })?;

        if let Some(dropoff) = request.dropoff_date {
            if dropoff < request.pickup_date {
                return Err(AppError::BadRequest(
                    "dropoff_date cannot be before pickup_date".to_string(),
                ));
            }
        }

        let broker = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        let total_miles = match request.total_miles {
            Some(miles) if miles > 0 => miles,
            Some(_) => {
                return Err(AppError::BadRequest(
                    "total_miles must be positive".to_string(),
                ))
            }
            None => self.resolve_miles(&request).await?,
        };

        let load = self
            .repository
            .create(NewLoad {
                broker_id: broker.id,
                broker_name: broker.full_name.clone(),
                broker_mc: broker_mc(&broker),
                pickup_city: request.pickup_city,
                pickup_state: request.pickup_state.to_uppercase(),
                dropoff_city: request.dropoff_city,
                dropoff_state: request.dropoff_state.to_uppercase(),
                pickup_date: request.pickup_date,
                dropoff_date: request.dropoff_date,
                total_miles,
                equipment_type: request.equipment_type,
                load_type: request.load_type,
                weight_lbs: request.weight_lbs,
                pay_rate: request.pay_rate,
                details: request.details,
            })
            .await?;

        tracing::info!("📦 Load {} publicado por broker {}", load.id, broker.id);

        Ok(ApiResponse::success_with_message(
            LoadResponse::from(load),
            "Load publicado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<LoadResponse, AppError> {
        let load = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        Ok(LoadResponse::from(load))
    }

    pub async fn list(&self, filters: LoadFilters) -> Result<Vec<LoadResponse>, AppError> {
        let loads = self.repository.list(filters).await?;
        Ok(loads.into_iter().map(LoadResponse::from).collect())
    }

    /// Editar campos no-estado del load. El caller ya resolvió que el
    /// PATCH no pide una cancelación.
    pub async fn update(
        &self,
        id: Uuid,
        caller: &AuthUser,
        request: UpdateLoadRequest,
    ) -> Result<ApiResponse<LoadResponse>, AppError> {
        request.validate()?;

        // status solo admite la transición a canceled, y esa va por el
        // flujo de booking
        if let Some(status) = request.status {
            if status != LoadStatus::Canceled {
                return Err(AppError::BadRequest(
                    "status can only be patched to canceled".to_string(),
                ));
            }
        }

        let load = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        if load.broker_id != caller.id && caller.role != crate::models::user::UserRole::Admin {
            return Err(AppError::Forbidden(
                "Only the posting broker can modify this load".to_string(),
            ));
        }

        let updated = self
            .repository
            .update_fields(
                id,
                request.pickup_date,
                request.dropoff_date,
                request.pay_rate,
                request.weight_lbs,
                request.details,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            LoadResponse::from(updated),
            "Load actualizado exitosamente".to_string(),
        ))
    }

    async fn resolve_miles(&self, request: &CreateLoadRequest) -> Result<i32, AppError> {
        let Some(geo) = &self.geo else {
            return Err(AppError::BadRequest(
                "total_miles is required when route lookup is not configured".to_string(),
            ));
        };

        let origin = format!("{}, {}", request.pickup_city, request.pickup_state);
        let destination = format!("{}, {}", request.dropoff_city, request.dropoff_state);

        let distance = geo
            .distance(&origin, &destination)
            .await
            .map_err(|e| AppError::ExternalApi(format!("Route lookup failed: {}", e)))?;

        if distance.estimated {
            tracing::warn!(
                "⚠️ Millas estimadas para {} → {}: {}",
                origin,
                destination,
                distance.miles
            );
        }

        Ok(distance.miles)
    }
}

fn broker_mc(broker: &User) -> String {
    broker.mc_number.clone().unwrap_or_else(|| "N/A".to_string())
}
