//! Modelo de LoadRequest
//!
//! Un LoadRequest es la oferta de un carrier o dispatcher para llevar
//! un load concreto. Las transiciones de estado son de una sola vía:
//! pending → accepted | declined, ambos terminales.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::load::EquipmentType;

/// Estado de un load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    /// accepted y declined son terminales; ningún request vuelve a pending
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// Verificar si la transición de estado es válida
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Declined)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Declined => write!(f, "declined"),
        }
    }
}

/// Quién origina el request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "requester_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequesterType {
    Carrier,
    Dispatcher,
}

/// LoadRequest - mapea exactamente a la tabla load_requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoadRequest {
    pub id: Uuid,
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
    // Presentes solo cuando requester_type = dispatcher
    pub dispatcher_name: Option<String>,
    pub dispatcher_phone: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Filtros para búsqueda de load requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadRequestFilters {
    pub load_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
    pub mc_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_the_only_non_terminal_state() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Declined.is_terminal());
    }

    #[test]
    fn test_transitions_are_one_way() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Accepted));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Declined));

        // Una vez accepted/declined, ningún cambio posterior es válido
        let all = [RequestStatus::Pending, RequestStatus::Accepted, RequestStatus::Declined];
        for next in all {
            assert!(!RequestStatus::Accepted.can_transition_to(next));
            assert!(!RequestStatus::Declined.can_transition_to(next));
        }
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
    }
}
