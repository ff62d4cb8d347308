//! Repositorio de loads
//!
//! CRUD sobre la tabla loads. Las actualizaciones de estado son
//! compare-and-swap: solo aplican si el load sigue en el estado esperado.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::load::{EquipmentType, Load, LoadFilters, LoadStatus, LoadType};
use crate::utils::errors::AppError;

pub struct NewLoad {
    pub broker_id: Uuid,
    pub broker_name: String,
    pub broker_mc: String,
    pub pickup_city: String,
    pub pickup_state: String,
    pub dropoff_city: String,
    pub dropoff_state: String,
    pub pickup_date: NaiveDate,
    pub dropoff_date: Option<NaiveDate>,
    pub total_miles: i32,
    pub equipment_type: EquipmentType,
    pub load_type: Option<LoadType>,
    pub weight_lbs: i32,
    pub pay_rate: Decimal,
    pub details: Option<String>,
}

pub struct LoadRepository {
    pool: PgPool,
}

impl LoadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_load: NewLoad) -> Result<Load, AppError> {
        let load = sqlx::query_as::<_, Load>(
            r#"
            INSERT INTO loads (id, broker_id, broker_name, broker_mc,
                               pickup_city, pickup_state, dropoff_city, dropoff_state,
                               pickup_date, dropoff_date, total_miles,
                               equipment_type, load_type, weight_lbs, pay_rate,
                               details, status, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, 'available', $17)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_load.broker_id)
        .bind(new_load.broker_name)
        .bind(new_load.broker_mc)
        .bind(new_load.pickup_city)
        .bind(new_load.pickup_state)
        .bind(new_load.dropoff_city)
        .bind(new_load.dropoff_state)
        .bind(new_load.pickup_date)
        .bind(new_load.dropoff_date)
        .bind(new_load.total_miles)
        .bind(new_load.equipment_type)
        .bind(new_load.load_type)
        .bind(new_load.weight_lbs)
        .bind(new_load.pay_rate)
        .bind(new_load.details)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(load)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Load>, AppError> {
        let load = sqlx::query_as::<_, Load>("SELECT * FROM loads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(load)
    }

    pub async fn list(&self, filters: LoadFilters) -> Result<Vec<Load>, AppError> {
        let loads = sqlx::query_as::<_, Load>(
            r#"
            SELECT * FROM loads
            WHERE ($1::load_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR broker_id = $2)
              AND ($3::equipment_type IS NULL OR equipment_type = $3)
              AND ($4::text IS NULL OR pickup_state = $4)
              AND ($5::text IS NULL OR dropoff_state = $5)
              AND ($6::text IS NULL OR pickup_city ILIKE '%' || $6 || '%'
                                    OR dropoff_city ILIKE '%' || $6 || '%'
                                    OR broker_name ILIKE '%' || $6 || '%')
              AND ($7::numeric IS NULL OR pay_rate >= $7)
              AND ($8::integer IS NULL OR weight_lbs <= $8)
            ORDER BY posted_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.broker_id)
        .bind(filters.equipment_type)
        .bind(filters.pickup_state)
        .bind(filters.dropoff_state)
        .bind(filters.search)
        .bind(filters.min_rate)
        .bind(filters.max_weight)
        .fetch_all(&self.pool)
        .await?;

        Ok(loads)
    }

    pub async fn update_fields(
        &self,
        id: Uuid,
        pickup_date: Option<NaiveDate>,
        dropoff_date: Option<NaiveDate>,
        pay_rate: Option<Decimal>,
        weight_lbs: Option<i32>,
        details: Option<String>,
    ) -> Result<Load, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        let load = sqlx::query_as::<_, Load>(
            r#"
            UPDATE loads
            SET pickup_date = $2, dropoff_date = $3, pay_rate = $4, weight_lbs = $5, details = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(pickup_date.unwrap_or(current.pickup_date))
        .bind(dropoff_date.or(current.dropoff_date))
        .bind(pay_rate.unwrap_or(current.pay_rate))
        .bind(weight_lbs.unwrap_or(current.weight_lbs))
        .bind(details.or(current.details))
        .fetch_one(&self.pool)
        .await?;

        Ok(load)
    }

    /// Transición de estado guardada: solo aplica si el load sigue en
    /// `expected`. Devuelve None si otro writer ganó la carrera.
    pub async fn cas_update_status(
        conn: &mut PgConnection,
        id: Uuid,
        expected: LoadStatus,
        next: LoadStatus,
    ) -> Result<Option<Load>, AppError> {
        let load = sqlx::query_as::<_, Load>(
            "UPDATE loads SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(conn)
        .await?;

        Ok(load)
    }

    /// Variante no transaccional del CAS para operaciones de un solo paso
    pub async fn cas_update_status_pool(
        &self,
        id: Uuid,
        expected: LoadStatus,
        next: LoadStatus,
    ) -> Result<Option<Load>, AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::cas_update_status(&mut conn, id, expected, next).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM loads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
