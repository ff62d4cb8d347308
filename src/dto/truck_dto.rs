use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::load::EquipmentType;
use crate::models::posted_truck::{PostedTruck, TruckStatus};
use crate::models::user::UserRole;

// Request para publicar un truck disponible
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(length(min = 2, max = 100))]
    pub driver_name: String,

    pub phone: String,
    pub email: Option<String>,
    pub mc_number: String,
    pub equipment_type: EquipmentType,

    #[validate(range(min = 1, max = 80000))]
    pub max_weight_lbs: i32,

    #[validate(length(min = 2, max = 200))]
    pub current_location: String,

    pub available_date: NaiveDate,
    pub available_time: Option<String>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

// Request para contratar un truck contra un load
#[derive(Debug, Deserialize)]
pub struct HireTruckRequest {
    pub load_id: Uuid,
}

// Query params de GET /trucks
#[derive(Debug, Default, Deserialize)]
pub struct TruckQuery {
    pub status: Option<TruckStatus>,
    pub equipment_type: Option<EquipmentType>,
    pub location: Option<String>,
}

// Response de truck publicado para la API
#[derive(Debug, Clone, Serialize)]
pub struct TruckResponse {
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
    pub hired_load_id: Option<Uuid>,
    pub posted_at: DateTime<Utc>,
}

impl From<PostedTruck> for TruckResponse {
    fn from(truck: PostedTruck) -> Self {
        Self {
            id: truck.id,
            driver_name: truck.driver_name,
            phone: truck.phone,
            email: truck.email,
            mc_number: truck.mc_number,
            equipment_type: truck.equipment_type,
            max_weight_lbs: truck.max_weight_lbs,
            current_location: truck.current_location,
            available_date: truck.available_date,
            available_time: truck.available_time,
            notes: truck.notes,
            posted_by_id: truck.posted_by_id,
            posted_by_role: truck.posted_by_role,
            status: truck.status,
            hired_load_id: truck.hired_load_id,
            posted_at: truck.posted_at,
        }
    }
}
