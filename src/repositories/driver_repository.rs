//! Repositorio de drivers del roster

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::AppError;

pub struct NewDriver {
    pub dispatcher_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_url: Option<String>,
    pub insurance_url: Option<String>,
    pub w9_url: Option<String>,
}

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear el driver ya onboarded (el onboarding consume la invitación)
    pub async fn create(&self, new_driver: NewDriver) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, dispatcher_id, full_name, email, phone,
                                 license_url, insurance_url, w9_url, onboarded, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_driver.dispatcher_id)
        .bind(new_driver.full_name)
        .bind(new_driver.email)
        .bind(new_driver.phone)
        .bind(new_driver.license_url)
        .bind(new_driver.insurance_url)
        .bind(new_driver.w9_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn list_by_dispatcher(&self, dispatcher_id: Uuid) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE dispatcher_id = $1 ORDER BY created_at DESC",
        )
        .bind(dispatcher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }
}
