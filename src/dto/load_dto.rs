use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::load::{EquipmentType, Load, LoadStatus, LoadType};

// Request para publicar un load
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoadRequest {
    #[validate(length(min = 2, max = 100))]
    pub pickup_city: String,

    #[validate(length(min = 2, max = 2))]
    pub pickup_state: String,

    #[validate(length(min = 2, max = 100))]
    pub dropoff_city: String,

    #[validate(length(min = 2, max = 2))]
    pub dropoff_state: String,

    pub pickup_date: NaiveDate,
    pub dropoff_date: Option<NaiveDate>,

    // Si no viene, se calcula contra el proveedor geo
    pub total_miles: Option<i32>,

    pub equipment_type: EquipmentType,
    pub load_type: Option<LoadType>,

    #[validate(range(min = 1, max = 80000))]
    pub weight_lbs: i32,

    pub pay_rate: Decimal,

    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

// Request para actualizar un load (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLoadRequest {
    pub pickup_date: Option<NaiveDate>,
    pub dropoff_date: Option<NaiveDate>,
    pub pay_rate: Option<Decimal>,

    #[validate(range(min = 1, max = 80000))]
    pub weight_lbs: Option<i32>,

    #[validate(length(max = 2000))]
    pub details: Option<String>,

    // status=canceled dispara el flujo de cancelación con notificaciones
    pub status: Option<LoadStatus>,
}

// Response de load para la API
#[derive(Debug, Clone, Serialize)]
pub struct LoadResponse {
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

impl From<Load> for LoadResponse {
    fn from(load: Load) -> Self {
        Self {
            id: load.id,
            broker_id: load.broker_id,
            broker_name: load.broker_name,
            broker_mc: load.broker_mc,
            pickup_city: load.pickup_city,
            pickup_state: load.pickup_state,
            dropoff_city: load.dropoff_city,
            dropoff_state: load.dropoff_state,
            pickup_date: load.pickup_date,
            dropoff_date: load.dropoff_date,
            total_miles: load.total_miles,
            equipment_type: load.equipment_type,
            load_type: load.load_type,
            weight_lbs: load.weight_lbs,
            pay_rate: load.pay_rate,
            details: load.details,
            status: load.status,
            posted_at: load.posted_at,
        }
    }
}
