use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::message::Message;
use crate::models::user::UserRole;

// Request para enviar un mensaje en el hilo de un load
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    pub load_id: Uuid,

    #[validate(length(min = 1, max = 5000))]
    pub content: String,

    // Tag opcional, ej. "rate_con" para tarjetas de rate confirmation
    pub message_type: Option<String>,
}

// Request para marcar como leídos los mensajes de un hilo (PATCH bulk)
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub load_id: Uuid,
}

// Query params de GET /messages
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub load_id: Uuid,
    pub unread_only: Option<bool>,
}

// Response de mensaje para la API
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub load_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: UserRole,
    pub content: String,
    pub message_type: Option<String>,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            load_id: message.load_id,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            sender_role: message.sender_role,
            content: message.content,
            message_type: message.message_type,
            read: message.read,
            timestamp: message.timestamp,
        }
    }
}
