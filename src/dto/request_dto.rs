use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::load::EquipmentType;
use crate::models::load_request::{LoadRequest, RequestStatus, RequesterType};

// Request para someter un booking request contra un load
#[derive(Debug, Deserialize)]
pub struct CreateLoadRequestDto {
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
    pub dispatcher_name: Option<String>,
    pub dispatcher_phone: Option<String>,
}

// Request para actualizar el estado de un booking request (PATCH)
#[derive(Debug, Deserialize)]
pub struct UpdateLoadRequestDto {
    pub status: RequestStatus,
}

// Query params de GET /requests
#[derive(Debug, Default, Deserialize)]
pub struct LoadRequestQuery {
    pub load_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
}

// Response de load request para la API
#[derive(Debug, Clone, Serialize)]
pub struct LoadRequestResponse {
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
    pub dispatcher_name: Option<String>,
    pub dispatcher_phone: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<LoadRequest> for LoadRequestResponse {
    fn from(request: LoadRequest) -> Self {
        Self {
            id: request.id,
            load_id: request.load_id,
            requester_type: request.requester_type,
            driver_name: request.driver_name,
            company_name: request.company_name,
            mc_number: request.mc_number,
            phone: request.phone,
            requester_email: request.requester_email,
            truck_type: request.truck_type,
            truck_number: request.truck_number,
            truck_location: request.truck_location,
            counter_offer: request.counter_offer,
            dispatcher_name: request.dispatcher_name,
            dispatcher_phone: request.dispatcher_phone,
            status: request.status,
            created_at: request.created_at,
        }
    }
}
