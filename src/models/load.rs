//! Modelo de Load
//!
//! Este módulo contiene el struct Load, sus enums de estado y las reglas
//! puras de transición del ciclo de vida de booking.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de un load publicado.
///
/// Transiciones permitidas: available ⇄ booked, y cualquier estado no
/// terminal → canceled. `canceled` es terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "load_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Available,
    Booked,
    Canceled,
}

impl LoadStatus {
    /// Un load cancelado no admite más transiciones
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadStatus::Canceled)
    }

    /// Solo los loads disponibles aceptan requests nuevos
    pub fn accepts_requests(&self) -> bool {
        matches!(self, LoadStatus::Available)
    }

    /// Verificar si la transición de estado es válida
    pub fn can_transition_to(&self, next: LoadStatus) -> bool {
        match (self, next) {
            (LoadStatus::Available, LoadStatus::Booked) => true,
            (LoadStatus::Booked, LoadStatus::Available) => true,
            (LoadStatus::Available, LoadStatus::Canceled) => true,
            (LoadStatus::Booked, LoadStatus::Canceled) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Available => write!(f, "available"),
            LoadStatus::Booked => write!(f, "booked"),
            LoadStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Tipo de equipo requerido para el load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "equipment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    BoxTruck,
    CargoVan,
    SprinterVan,
    Hotshot,
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentType::BoxTruck => write!(f, "Box Truck"),
            EquipmentType::CargoVan => write!(f, "Cargo Van"),
            EquipmentType::SprinterVan => write!(f, "Sprinter Van"),
            EquipmentType::Hotshot => write!(f, "Hotshot"),
        }
    }
}

/// Full truckload o less-than-truckload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "load_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoadType {
    Ftl,
    Ltl,
}

/// Load - mapea exactamente a la tabla loads
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Load {
    pub id: Uuid,
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
    pub status: LoadStatus,
    pub posted_at: DateTime<Utc>,
}

impl Load {
    /// Resumen de ruta para emails y logs, ej. "Dallas, TX → Atlanta, GA"
    pub fn route_summary(&self) -> String {
        format!(
            "{}, {} → {}, {}",
            self.pickup_city, self.pickup_state, self.dropoff_city, self.dropoff_state
        )
    }
}

/// Filtros para búsqueda de loads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadFilters {
    pub status: Option<LoadStatus>,
    pub broker_id: Option<Uuid>,
    pub equipment_type: Option<EquipmentType>,
    pub pickup_state: Option<String>,
    pub dropoff_state: Option<String>,
    pub search: Option<String>,
    pub min_rate: Option<Decimal>,
    pub max_weight: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_closed_set_and_canceled_is_terminal() {
        let all = [LoadStatus::Available, LoadStatus::Booked, LoadStatus::Canceled];
        for next in all {
            assert!(!LoadStatus::Canceled.can_transition_to(next));
        }
        assert!(LoadStatus::Canceled.is_terminal());
        assert!(!LoadStatus::Available.is_terminal());
        assert!(!LoadStatus::Booked.is_terminal());
    }

    #[test]
    fn test_booking_transitions() {
        assert!(LoadStatus::Available.can_transition_to(LoadStatus::Booked));
        assert!(LoadStatus::Booked.can_transition_to(LoadStatus::Available));
        assert!(LoadStatus::Available.can_transition_to(LoadStatus::Canceled));
        assert!(LoadStatus::Booked.can_transition_to(LoadStatus::Canceled));
        assert!(!LoadStatus::Available.can_transition_to(LoadStatus::Available));
        assert!(!LoadStatus::Booked.can_transition_to(LoadStatus::Booked));
    }

    #[test]
    fn test_only_available_accepts_requests() {
        assert!(LoadStatus::Available.accepts_requests());
        assert!(!LoadStatus::Booked.accepts_requests());
        assert!(!LoadStatus::Canceled.accepts_requests());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LoadStatus::Available).unwrap(), "\"available\"");
        assert_eq!(serde_json::to_string(&EquipmentType::BoxTruck).unwrap(), "\"box_truck\"");
        assert_eq!(serde_json::to_string(&LoadType::Ftl).unwrap(), "\"ftl\"");
    }
}
