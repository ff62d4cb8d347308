//! Repositorio de tokens de un solo uso
//!
//! Invitaciones de drivers, códigos OTP y tokens de reset. El consumo de
//! un token es un UPDATE guardado por el flag para que dos usos
//! concurrentes no puedan pasar ambos.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::token::{DriverInvite, OtpCode, PasswordReset};
use crate::utils::errors::AppError;

pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Invitaciones de drivers ---

    pub async fn create_invite(
        &self,
        dispatcher_id: Uuid,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<DriverInvite, AppError> {
        let invite = sqlx::query_as::<_, DriverInvite>(
            r#"
            INSERT INTO driver_invites (id, dispatcher_id, email, token, used, expires_at, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dispatcher_id)
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(invite)
    }

    pub async fn find_invite_by_token(&self, token: &str) -> Result<Option<DriverInvite>, AppError> {
        let invite =
            sqlx::query_as::<_, DriverInvite>("SELECT * FROM driver_invites WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(invite)
    }

    /// Consumir la invitación; devuelve false si ya estaba usada
    pub async fn consume_invite(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE driver_invites SET used = TRUE WHERE id = $1 AND used = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Códigos OTP ---

    pub async fn create_otp(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<OtpCode, AppError> {
        let otp = sqlx::query_as::<_, OtpCode>(
            r#"
            INSERT INTO otp_codes (id, email, code, consumed, expires_at, created_at)
            VALUES ($1, $2, $3, FALSE, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(otp)
    }

    pub async fn find_otp(&self, email: &str, code: &str) -> Result<Option<OtpCode>, AppError> {
        let otp = sqlx::query_as::<_, OtpCode>(
            r#"
            SELECT * FROM otp_codes
            WHERE LOWER(email) = LOWER($1) AND code = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(otp)
    }

    pub async fn consume_otp(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE otp_codes SET consumed = TRUE WHERE id = $1 AND consumed = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Tokens de reset de contraseña ---

    pub async fn create_reset(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordReset, AppError> {
        let reset = sqlx::query_as::<_, PasswordReset>(
            r#"
            INSERT INTO password_resets (id, user_id, token, used, expires_at, created_at)
            VALUES ($1, $2, $3, FALSE, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(reset)
    }

    pub async fn find_reset_by_token(&self, token: &str) -> Result<Option<PasswordReset>, AppError> {
        let reset =
            sqlx::query_as::<_, PasswordReset>("SELECT * FROM password_resets WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reset)
    }

    pub async fn consume_reset(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE password_resets SET used = TRUE WHERE id = $1 AND used = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
