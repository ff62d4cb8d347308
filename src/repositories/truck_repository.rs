//! Repositorio de trucks publicados

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::load::EquipmentType;
use crate::models::posted_truck::{PostedTruck, PostedTruckFilters, TruckStatus};
use crate::models::user::UserRole;
use crate::utils::errors::AppError;

pub struct NewPostedTruck {
    pub driver_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub mc_number: String,
    pub equipment_type: EquipmentType,
    pub max_weight_lbs: i32,
    pub current_location: String,
    pub available_date: NaiveDate,
    pub available_time: Option<String>,
    pub notes: Option<String>,
    pub posted_by_id: Uuid,
    pub posted_by_role: UserRole,
}

pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_truck: NewPostedTruck) -> Result<PostedTruck, AppError> {
        let truck = sqlx::query_as::<_, PostedTruck>(
            r#"
            INSERT INTO posted_trucks (id, driver_name, phone, email, mc_number, equipment_type,
                                       max_weight_lbs, current_location, available_date,
                                       available_time, notes, posted_by_id, posted_by_role,
                                       status, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'available', $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_truck.driver_name)
        .bind(new_truck.phone)
        .bind(new_truck.email)
        .bind(new_truck.mc_number)
        .bind(new_truck.equipment_type)
        .bind(new_truck.max_weight_lbs)
        .bind(new_truck.current_location)
        .bind(new_truck.available_date)
        .bind(new_truck.available_time)
        .bind(new_truck.notes)
        .bind(new_truck.posted_by_id)
        .bind(new_truck.posted_by_role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PostedTruck>, AppError> {
        let truck = sqlx::query_as::<_, PostedTruck>("SELECT * FROM posted_trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }

    pub async fn list(&self, filters: PostedTruckFilters) -> Result<Vec<PostedTruck>, AppError> {
        let trucks = sqlx::query_as::<_, PostedTruck>(
            r#"
            SELECT * FROM posted_trucks
            WHERE ($1::truck_status IS NULL OR status = $1)
              AND ($2::equipment_type IS NULL OR equipment_type = $2)
              AND ($3::uuid IS NULL OR posted_by_id = $3)
              AND ($4::text IS NULL OR current_location ILIKE '%' || $4 || '%')
            ORDER BY posted_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.equipment_type)
        .bind(filters.posted_by_id)
        .bind(filters.location)
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    /// Contratar un truck contra un load. Guardado por estado: solo aplica
    /// si el truck sigue disponible. Devuelve None si ya fue contratado.
    pub async fn cas_hire(
        &self,
        id: Uuid,
        load_id: Uuid,
    ) -> Result<Option<PostedTruck>, AppError> {
        let truck = sqlx::query_as::<_, PostedTruck>(
            r#"
            UPDATE posted_trucks
            SET status = 'hired', hired_load_id = $2
            WHERE id = $1 AND status = 'available'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(load_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posted_trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
