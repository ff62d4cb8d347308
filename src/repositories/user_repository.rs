//! Repositorio de usuarios

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserRole};
use crate::utils::errors::AppError;

pub struct NewUser {
    pub role: UserRole,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mc_number: Option<String>,
    pub company_name: Option<String>,
    pub password_hash: String,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, role, full_name, email, phone, mc_number, company_name,
                               password_hash, trial_ends_at, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_user.role)
        .bind(new_user.full_name)
        .bind(new_user.email)
        .bind(new_user.phone)
        .bind(new_user.mc_number)
        .bind(new_user.company_name)
        .bind(new_user.password_hash)
        .bind(new_user.trial_ends_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_stripe_customer(&self, id: Uuid, customer_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET stripe_customer_id = $2 WHERE id = $1")
            .bind(id)
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Suspender la cuenta asociada a un customer de Stripe.
    /// Devuelve el usuario afectado, si existe.
    pub async fn suspend_by_stripe_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET active = FALSE WHERE stripe_customer_id = $1 RETURNING *",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Usuarios cuyo trial termina dentro de la ventana dada (para el cron
    /// de payment reminders)
    pub async fn trial_ending_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE active = TRUE
              AND trial_ends_at IS NOT NULL
              AND trial_ends_at >= $1
              AND trial_ends_at < $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
