use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::Driver;

// Request para invitar un driver por email
#[derive(Debug, Deserialize, Validate)]
pub struct InviteDriverRequest {
    #[validate(email)]
    pub email: String,
}

// Request de onboarding de driver, consume el token de invitación
#[derive(Debug, Deserialize, Validate)]
pub struct OnboardingRequest {
    pub token: String,

    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    pub phone: Option<String>,

    // URLs a blob storage; el upload queda fuera de este servicio
    pub license_url: Option<String>,
    pub insurance_url: Option<String>,
    pub w9_url: Option<String>,
}

// Response de driver para la API
#[derive(Debug, Clone, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub dispatcher_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_url: Option<String>,
    pub insurance_url: Option<String>,
    pub w9_url: Option<String>,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            dispatcher_id: driver.dispatcher_id,
            full_name: driver.full_name,
            email: driver.email,
            phone: driver.phone,
            license_url: driver.license_url,
            insurance_url: driver.insurance_url,
            w9_url: driver.w9_url,
            onboarded: driver.onboarded,
            created_at: driver.created_at,
        }
    }
}
