//! Modelo de PostedTruck
//!
//! Listado de capacidad disponible de un carrier o dispatcher,
//! independiente de cualquier load hasta que un broker lo contrata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{load::EquipmentType, user::UserRole};

/// Estado de un truck publicado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "truck_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    Available,
    Hired,
}

/// PostedTruck - mapea exactamente a la tabla posted_trucks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostedTruck {
    pub id: Uuid,
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
    pub status: TruckStatus,
    // Se setea una sola vez cuando el truck pasa a hired
    pub hired_load_id: Option<Uuid>,
    pub posted_at: DateTime<Utc>,
}

/// Filtros para búsqueda de trucks publicados
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostedTruckFilters {
    pub status: Option<TruckStatus>,
    pub equipment_type: Option<EquipmentType>,
    pub posted_by_id: Option<Uuid>,
    pub location: Option<String>,
}
