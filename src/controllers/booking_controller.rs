//! Controller del ciclo de vida de booking
//!
//! Única superficie de mutación para Load.status y LoadRequest.status.
//! Cada operación aplica ambas actualizaciones bajo una transacción con
//! guards compare-and-swap, y dispara la notificación que corresponde.
//! Los envíos de email son fire-and-forget: un fallo del proveedor nunca
//! bloquea ni revierte el cambio de estado.

use std::future::Future;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::request_dto::{CreateLoadRequestDto, LoadRequestQuery};
use crate::middleware::auth::AuthUser;
use crate::models::load::{Load, LoadStatus};
use crate::models::load_request::{LoadRequest, LoadRequestFilters, RequestStatus};
use crate::models::posted_truck::PostedTruck;
use crate::models::user::UserRole;
use crate::repositories::load_repository::LoadRepository;
use crate::repositories::request_repository::{LoadRequestRepository, NewLoadRequest};
use crate::repositories::truck_repository::TruckRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::mailer_service::{LoadSummary, Mailer, RequesterSummary};
use crate::utils::errors::AppError;
use crate::utils::validation::missing_request_fields;

pub struct BookingController {
    pool: PgPool,
    loads: LoadRepository,
    requests: LoadRequestRepository,
    trucks: TruckRepository,
    users: UserRepository,
    mailer: Arc<dyn Mailer>,
}

impl BookingController {
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            loads: LoadRepository::new(pool.clone()),
            requests: LoadRequestRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            pool,
            mailer,
        }
    }

    pub async fn get_request(&self, id: Uuid) -> Result<LoadRequest, AppError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load request not found".to_string()))
    }

    pub async fn list_requests(
        &self,
        query: LoadRequestQuery,
    ) -> Result<Vec<LoadRequest>, AppError> {
        self.requests
            .list(LoadRequestFilters {
                load_id: query.load_id,
                status: query.status,
                mc_number: None,
            })
            .await
    }

    /// Someter un booking request contra un load disponible.
    /// No toca Load.status.
    pub async fn submit_request(
        &self,
        dto: CreateLoadRequestDto,
    ) -> Result<LoadRequest, AppError> {
        let missing = missing_request_fields(&[
            ("driver_name", &dto.driver_name),
            ("company_name", &dto.company_name),
            ("mc_number", &dto.mc_number),
            ("phone", &dto.phone),
            ("truck_location", &dto.truck_location),
        ]);
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let load = self
            .loads
            .find_by_id(dto.load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        // El precondición se valida antes del INSERT: un load no disponible
        // no debe generar ninguna fila
        if !load.status.accepts_requests() {
            return Err(AppError::BadRequest(format!(
                "Load is not available for requests (status: {})",
                load.status
            )));
        }

        // El INSERT vuelve a chequear el estado del load en la misma
        // sentencia: un accept concurrente entre el check de arriba y acá
        // no puede dejar un pending contra un load booked
        let request = self
            .requests
            .create(NewLoadRequest {
                load_id: dto.load_id,
                requester_type: dto.requester_type,
                driver_name: dto.driver_name,
                company_name: dto.company_name,
                mc_number: dto.mc_number,
                phone: dto.phone,
                requester_email: dto.requester_email,
                truck_type: dto.truck_type,
                truck_number: dto.truck_number,
                truck_location: dto.truck_location,
                counter_offer: dto.counter_offer,
                dispatcher_name: dto.dispatcher_name,
                dispatcher_phone: dto.dispatcher_phone,
            })
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Load is no longer available for requests".to_string())
            })?;

        // Notificar al broker dueño del load
        if let Some(broker) = self.users.find_by_id(load.broker_id).await? {
            let mailer = self.mailer.clone();
            let summary = Self::load_summary(&load);
            let requester = RequesterSummary {
                driver_name: request.driver_name.clone(),
                company_name: request.company_name.clone(),
                mc_number: request.mc_number.clone(),
                phone: request.phone.clone(),
                truck_type: request.truck_type.to_string(),
                truck_location: request.truck_location.clone(),
                counter_offer: request.counter_offer,
            };
            spawn_notification(async move {
                mailer
                    .send_request_created(&broker.email, &summary, &requester)
                    .await
            });
        }

        Ok(request)
    }

    /// Aceptar un request pendiente. Mueve request → accepted y load →
    /// booked como una sola operación lógica. Repetir el accept sobre un
    /// request ya aceptado es un no-op sin email.
    pub async fn accept_request(
        &self,
        request_id: Uuid,
        caller: &AuthUser,
    ) -> Result<LoadRequest, AppError> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load request not found".to_string()))?;

        let load = self
            .loads
            .find_by_id(request.load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        Self::require_load_owner(&load, caller)?;

        // Accept repetido: estado terminal alcanzado, sin email duplicado
        if Self::check_request_transition(request.status, RequestStatus::Accepted)? {
            return Ok(request);
        }

        // Pre-check barato antes de abrir la transacción; el CAS de abajo
        // sigue siendo la garantía real
        if !load.status.can_transition_to(LoadStatus::Booked) {
            return Err(AppError::Conflict(
                "Load is no longer available".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let accepted = LoadRequestRepository::cas_update_status(
            &mut *tx,
            request_id,
            RequestStatus::Pending,
            RequestStatus::Accepted,
        )
        .await?;

        let Some(accepted) = accepted else {
            // Otro writer movió el request entre el fetch y el update
            tx.rollback().await?;
            let current = self
                .requests
                .find_by_id(request_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Load request not found".to_string()))?;
            if current.status == RequestStatus::Accepted {
                return Ok(current);
            }
            return Err(AppError::Conflict(
                "Request is no longer pending".to_string(),
            ));
        };

        let booked = LoadRepository::cas_update_status(
            &mut *tx,
            load.id,
            LoadStatus::Available,
            LoadStatus::Booked,
        )
        .await?;

        let Some(booked) = booked else {
            // El load dejó de estar disponible (otro accept ganó, o fue
            // cancelado): revertimos el request también
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Load is no longer available".to_string(),
            ));
        };

        tx.commit().await?;

        tracing::info!(
            "✅ Request {} aceptado, load {} → booked",
            accepted.id,
            booked.id
        );

        if let Some(email) = accepted.requester_email.clone() {
            let mailer = self.mailer.clone();
            let summary = Self::load_summary(&booked);
            spawn_notification(async move { mailer.send_request_accepted(&email, &summary).await });
        }

        Ok(accepted)
    }

    /// Declinar un request pendiente. El load vuelve a available solo si
    /// estaba booked y no queda ningún request accepted (política de
    /// revert explícita).
    pub async fn decline_request(
        &self,
        request_id: Uuid,
        caller: &AuthUser,
    ) -> Result<LoadRequest, AppError> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load request not found".to_string()))?;

        let load = self
            .loads
            .find_by_id(request.load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        Self::require_load_owner(&load, caller)?;

        if Self::check_request_transition(request.status, RequestStatus::Declined)? {
            return Ok(request);
        }

        let mut tx = self.pool.begin().await?;

        let declined = LoadRequestRepository::cas_update_status(
            &mut *tx,
            request_id,
            RequestStatus::Pending,
            RequestStatus::Declined,
        )
        .await?;

        let Some(declined) = declined else {
            tx.rollback().await?;
            let current = self
                .requests
                .find_by_id(request_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Load request not found".to_string()))?;
            if current.status == RequestStatus::Declined {
                return Ok(current);
            }
            return Err(AppError::Conflict(
                "Request is no longer pending".to_string(),
            ));
        };

        // Revert: solo si el load quedó booked sin ningún accepted vivo
        if load.status == LoadStatus::Booked {
            let accepted_count =
                LoadRequestRepository::count_accepted_for_load(&mut *tx, load.id).await?;
            if accepted_count == 0 {
                LoadRepository::cas_update_status(
                    &mut *tx,
                    load.id,
                    LoadStatus::Booked,
                    LoadStatus::Available,
                )
                .await?;
            }
        }

        tx.commit().await?;

        if let Some(email) = declined.requester_email.clone() {
            let mailer = self.mailer.clone();
            let summary = Self::load_summary(&load);
            spawn_notification(async move { mailer.send_request_declined(&email, &summary).await });
        }

        Ok(declined)
    }

    /// Cancelar un load (terminal). Notifica a todos los requesters
    /// accepted que tengan email; los que no tienen se saltean en
    /// silencio y un fallo de envío no afecta ni al cancel ni al resto.
    pub async fn cancel_load(&self, load_id: Uuid, caller: &AuthUser) -> Result<Load, AppError> {
        let load = self
            .loads
            .find_by_id(load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        Self::require_load_owner(&load, caller)?;

        // Cancel repetido: terminal, no-op sin emails
        if load.status == LoadStatus::Canceled {
            return Ok(load);
        }

        let canceled = self
            .loads
            .cas_update_status_pool(load_id, load.status, LoadStatus::Canceled)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Load status changed, retry the cancel".to_string())
            })?;

        let accepted = self.requests.accepted_for_load(load_id).await?;

        let mailer = self.mailer.clone();
        let summary = Self::load_summary(&canceled);
        spawn_notification(async move {
            let sends = accepted
                .iter()
                .filter_map(|r| r.requester_email.as_deref())
                .map(|email| mailer.send_load_canceled(email, &summary));

            for result in futures::future::join_all(sends).await {
                if let Err(e) = result {
                    tracing::warn!("⚠️ Notificación de cancelación falló: {}", e);
                }
            }
            Ok(())
        });

        Ok(canceled)
    }

    /// Contratar un truck publicado contra un load
    pub async fn hire_truck(
        &self,
        truck_id: Uuid,
        load_id: Uuid,
    ) -> Result<PostedTruck, AppError> {
        self.loads
            .find_by_id(load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        let hired = self.trucks.cas_hire(truck_id, load_id).await?;

        match hired {
            Some(truck) => Ok(truck),
            None => {
                // Distinguir inexistente de ya contratado
                match self.trucks.find_by_id(truck_id).await? {
                    Some(_) => Err(AppError::Conflict("Truck is no longer available".to_string())),
                    None => Err(AppError::NotFound("Posted truck not found".to_string())),
                }
            }
        }
    }

    /// Hard delete del load, independiente del estado. Requests y
    /// mensajes asociados se borran en cascada.
    pub async fn delete_load(&self, load_id: Uuid, caller: &AuthUser) -> Result<(), AppError> {
        let load = self
            .loads
            .find_by_id(load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        Self::require_load_owner(&load, caller)?;

        self.loads.delete(load_id).await?;
        Ok(())
    }

    /// Hard delete de un truck publicado; solo su dueño (o un admin)
    pub async fn delete_posted_truck(
        &self,
        truck_id: Uuid,
        caller: &AuthUser,
    ) -> Result<(), AppError> {
        let truck = self
            .trucks
            .find_by_id(truck_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Posted truck not found".to_string()))?;

        if truck.posted_by_id != caller.id && caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Only the owner can delete this posted truck".to_string(),
            ));
        }

        self.trucks.delete(truck_id).await?;
        Ok(())
    }

    /// Guard de transición previo al CAS. Devuelve true si el request ya
    /// está en `next` (no-op idempotente) y Conflict si la transición
    /// viola la máquina de estados.
    fn check_request_transition(
        current: RequestStatus,
        next: RequestStatus,
    ) -> Result<bool, AppError> {
        if current == next {
            return Ok(true);
        }
        if !current.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Request was already {}",
                current
            )));
        }
        Ok(false)
    }

    fn require_load_owner(load: &Load, caller: &AuthUser) -> Result<(), AppError> {
        if load.broker_id != caller.id && caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Only the posting broker can modify this load".to_string(),
            ));
        }
        Ok(())
    }

    fn load_summary(load: &Load) -> LoadSummary {
        LoadSummary {
            load_id: load.id.to_string(),
            route: load.route_summary(),
            pay_rate: load.pay_rate,
            pickup_date: load.pickup_date,
            dropoff_date: load.dropoff_date,
            broker_name: load.broker_name.clone(),
            broker_mc: load.broker_mc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use crate::models::load::{EquipmentType, LoadType};

    fn test_load(broker_id: Uuid) -> Load {
        Load {
            id: Uuid::new_v4(),
            broker_id,
            broker_name: "Acme Logistics".to_string(),
            broker_mc: "MC-123456".to_string(),
            pickup_city: "Dallas".to_string(),
            pickup_state: "TX".to_string(),
            dropoff_city: "Atlanta".to_string(),
            dropoff_state: "GA".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            dropoff_date: None,
            total_miles: 780,
            equipment_type: EquipmentType::BoxTruck,
            load_type: Some(LoadType::Ftl),
            weight_lbs: 9500,
            pay_rate: Decimal::new(2_40000, 2),
            details: None,
            status: LoadStatus::Available,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_can_modify_load() {
        let broker_id = Uuid::new_v4();
        let load = test_load(broker_id);
        let owner = AuthUser {
            id: broker_id,
            role: UserRole::Broker,
        };
        assert!(BookingController::require_load_owner(&load, &owner).is_ok());
    }

    #[test]
    fn test_admin_can_modify_any_load() {
        let load = test_load(Uuid::new_v4());
        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert!(BookingController::require_load_owner(&load, &admin).is_ok());
    }

    #[test]
    fn test_other_broker_cannot_modify_load() {
        let load = test_load(Uuid::new_v4());
        let stranger = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Broker,
        };
        let err = BookingController::require_load_owner(&load, &stranger).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_pending_request_can_be_resolved() {
        let accept =
            BookingController::check_request_transition(RequestStatus::Pending, RequestStatus::Accepted);
        assert_eq!(accept.unwrap(), false);

        let decline =
            BookingController::check_request_transition(RequestStatus::Pending, RequestStatus::Declined);
        assert_eq!(decline.unwrap(), false);
    }

    #[test]
    fn test_repeated_resolution_is_noop() {
        let accept = BookingController::check_request_transition(
            RequestStatus::Accepted,
            RequestStatus::Accepted,
        );
        assert_eq!(accept.unwrap(), true);

        let decline = BookingController::check_request_transition(
            RequestStatus::Declined,
            RequestStatus::Declined,
        );
        assert_eq!(decline.unwrap(), true);
    }

    #[test]
    fn test_cross_resolution_is_conflict() {
        let err = BookingController::check_request_transition(
            RequestStatus::Declined,
            RequestStatus::Accepted,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("declined"));

        let err = BookingController::check_request_transition(
            RequestStatus::Accepted,
            RequestStatus::Declined,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_booked_and_canceled_loads_reject_booking() {
        assert!(LoadStatus::Available.can_transition_to(LoadStatus::Booked));
        assert!(!LoadStatus::Booked.can_transition_to(LoadStatus::Booked));
        assert!(!LoadStatus::Canceled.can_transition_to(LoadStatus::Booked));
    }

    #[test]
    fn test_load_summary_fields() {
        let load = test_load(Uuid::new_v4());
        let summary = BookingController::load_summary(&load);
        assert_eq!(summary.load_id, load.id.to_string());
        assert_eq!(summary.route, load.route_summary());
        assert_eq!(summary.broker_mc, "MC-123456");
        assert_eq!(summary.pay_rate, load.pay_rate);
    }
}

/// Despachar una notificación en background. El resultado se loguea y se
/// descarta: la operación de negocio ya terminó.
fn spawn_notification<F>(send: F)
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = send.await {
            tracing::warn!("⚠️ Notificación falló (no se reintenta): {}", e);
        }
    });
}
