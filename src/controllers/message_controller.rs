//! Controller de mensajería por load
//!
//! Hilo de chat entre el broker y la contraparte de un load. Los
//! mensajes son append-only; lo único que muta es el flag de lectura.

use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::message_dto::{CreateMessageRequest, MessageQuery, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::models::message::{MessageFilters, MESSAGE_TYPE_RATE_CON};
use crate::repositories::load_repository::LoadRepository;
use crate::repositories::message_repository::{MessageRepository, NewMessage};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct MessageController {
    repository: MessageRepository,
    loads: LoadRepository,
    users: UserRepository,
}

impl MessageController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: MessageRepository::new(pool.clone()),
            loads: LoadRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn send(
        &self,
        caller: &AuthUser,
        request: CreateMessageRequest,
    ) -> Result<ApiResponse<MessageResponse>, AppError> {
        request.validate()?;

        // El único tag estructurado soportado es la rate confirmation
        if let Some(ref message_type) = request.message_type {
            if message_type != MESSAGE_TYPE_RATE_CON {
                return Err(AppError::BadRequest(format!(
                    "Unknown message_type: {}",
                    message_type
                )));
            }
        }

        // El hilo existe solo mientras exista el load
        self.loads
            .find_by_id(request.load_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Load not found".to_string()))?;

        let sender = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        let message = self
            .repository
            .create(NewMessage {
                load_id: request.load_id,
                sender_id: sender.id,
                sender_name: sender.full_name,
                sender_role: sender.role,
                content: request.content,
                message_type: request.message_type,
            })
            .await?;

        Ok(ApiResponse::success(MessageResponse::from(message)))
    }

    pub async fn list(&self, query: MessageQuery) -> Result<Vec<MessageResponse>, AppError> {
        let messages = self
            .repository
            .list(MessageFilters {
                load_id: Some(query.load_id),
                unread_only: query.unread_only,
            })
            .await?;

        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Marcar como leídos los mensajes del hilo que no envió el lector
    pub async fn mark_read(
        &self,
        caller: &AuthUser,
        load_id: Uuid,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        let updated = self.repository.mark_read(load_id, caller.id).await?;

        Ok(ApiResponse::success(serde_json::json!({
            "updated": updated
        })))
    }
}
