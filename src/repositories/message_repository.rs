//! Repositorio de mensajes
//!
//! Append-only; la única mutación permitida es el flip bulk de `read`.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::{Message, MessageFilters};
use crate::models::user::UserRole;
use crate::utils::errors::AppError;

pub struct NewMessage {
    pub load_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: UserRole,
    pub content: String,
    pub message_type: Option<String>,
}

pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_message: NewMessage) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, load_id, sender_id, sender_name, sender_role,
                                  content, message_type, read, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_message.load_id)
        .bind(new_message.sender_id)
        .bind(new_message.sender_name)
        .bind(new_message.sender_role)
        .bind(new_message.content)
        .bind(new_message.message_type)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn list(&self, filters: MessageFilters) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE ($1::uuid IS NULL OR load_id = $1)
              AND ($2::boolean IS NULL OR $2 = FALSE OR read = FALSE)
            ORDER BY timestamp ASC
            "#,
        )
        .bind(filters.load_id)
        .bind(filters.unread_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Marcar como leídos todos los mensajes del hilo que NO envió el lector
    pub async fn mark_read(&self, load_id: Uuid, reader_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE messages SET read = TRUE WHERE load_id = $1 AND sender_id != $2 AND read = FALSE",
        )
        .bind(load_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
