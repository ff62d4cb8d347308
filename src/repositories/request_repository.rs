//! Repositorio de load requests
//!
//! Los requests nunca se borran; sus transiciones de estado son de una
//! sola vía y se aplican con compare-and-swap.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::load::EquipmentType;
use crate::models::load_request::{LoadRequest, LoadRequestFilters, RequestStatus, RequesterType};
use crate::utils::errors::AppError;

pub struct NewLoadRequest {
    pub load_id: Uuid,
    pub requester_type: RequesterType,
    pub driver_name: String,
    pub company_name: String,
    pub mc_number: String,
    pub phone: String,
    pub requester_email: Option<String>,
    pub truck_type: EquipmentType,
    pub truck_number: Option<String>,
    pub truck_location: String,
    pub counter_offer: Option<Decimal>,
    pub dispatcher_name: Option<String>,
    pub dispatcher_phone: Option<String>,
}

pub struct LoadRequestRepository {
    pool: PgPool,
}

impl LoadRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un request pending. El INSERT está guardado por el estado
    /// del load: si dejó de estar available entre el check del caller y
    /// acá, no se inserta ninguna fila y se devuelve None.
    pub async fn create(
        &self,
        new_request: NewLoadRequest,
    ) -> Result<Option<LoadRequest>, AppError> {
        let request = sqlx::query_as::<_, LoadRequest>(
            r#"
            INSERT INTO load_requests (id, load_id, requester_type, driver_name, company_name,
                                       mc_number, phone, requester_email, truck_type, truck_number,
                                       truck_location, counter_offer, dispatcher_name,
                                       dispatcher_phone, status, created_at)
            SELECT $1, loads.id, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'pending', $15
            FROM loads
            WHERE loads.id = $2 AND loads.status = 'available'
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_request.load_id)
        .bind(new_request.requester_type)
        .bind(new_request.driver_name)
        .bind(new_request.company_name)
        .bind(new_request.mc_number)
        .bind(new_request.phone)
        .bind(new_request.requester_email)
        .bind(new_request.truck_type)
        .bind(new_request.truck_number)
        .bind(new_request.truck_location)
        .bind(new_request.counter_offer)
        .bind(new_request.dispatcher_name)
        .bind(new_request.dispatcher_phone)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LoadRequest>, AppError> {
        let request = sqlx::query_as::<_, LoadRequest>("SELECT * FROM load_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    pub async fn list(&self, filters: LoadRequestFilters) -> Result<Vec<LoadRequest>, AppError> {
        let requests = sqlx::query_as::<_, LoadRequest>(
            r#"
            SELECT * FROM load_requests
            WHERE ($1::uuid IS NULL OR load_id = $1)
              AND ($2::request_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR mc_number = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.load_id)
        .bind(filters.status)
        .bind(filters.mc_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Requests accepted de un load (para notificar en la cancelación)
    pub async fn accepted_for_load(&self, load_id: Uuid) -> Result<Vec<LoadRequest>, AppError> {
        let requests = sqlx::query_as::<_, LoadRequest>(
            "SELECT * FROM load_requests WHERE load_id = $1 AND status = 'accepted'",
        )
        .bind(load_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Contar requests accepted de un load dentro de una transacción
    pub async fn count_accepted_for_load(
        conn: &mut PgConnection,
        load_id: Uuid,
    ) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM load_requests WHERE load_id = $1 AND status = 'accepted'",
        )
        .bind(load_id)
        .fetch_one(conn)
        .await?;

        Ok(count)
    }

    /// Transición de estado guardada: solo aplica si el request sigue en
    /// `expected`. Devuelve None si otro writer ganó la carrera.
    pub async fn cas_update_status(
        conn: &mut PgConnection,
        id: Uuid,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<LoadRequest>, AppError> {
        let request = sqlx::query_as::<_, LoadRequest>(
            "UPDATE load_requests SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(conn)
        .await?;

        Ok(request)
    }
}
