//! Modelo de Message
//!
//! Chat append-only entre broker y requester, con scope por load.
//! El flag `read` se voltea en bulk cuando la otra parte abre el hilo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::UserRole;

/// Tag de message_type para tarjetas de rate confirmation
pub const MESSAGE_TYPE_RATE_CON: &str = "rate_con";

/// Message - mapea exactamente a la tabla messages
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub load_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: UserRole,
    // Texto plano, o payload estructurado embebido como string tagueado
    // cuando message_type = "rate_con"
    pub content: String,
    pub message_type: Option<String>,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn is_rate_confirmation(&self) -> bool {
        self.message_type.as_deref() == Some(MESSAGE_TYPE_RATE_CON)
    }
}

/// Filtros para búsqueda de mensajes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageFilters {
    pub load_id: Option<Uuid>,
    pub unread_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_message(message_type: Option<&str>) -> Message {
        Message {
            id: Uuid::new_v4(),
            load_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            sender_name: "Acme Logistics".to_string(),
            sender_role: UserRole::Broker,
            content: "contenido".to_string(),
            message_type: message_type.map(|s| s.to_string()),
            read: false,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_rate_confirmation_tag() {
        assert!(test_message(Some(MESSAGE_TYPE_RATE_CON)).is_rate_confirmation());
        assert!(!test_message(Some("other")).is_rate_confirmation());
        assert!(!test_message(None).is_rate_confirmation());
    }
}
