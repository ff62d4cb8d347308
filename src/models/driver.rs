//! Modelo de Driver
//!
//! Entrada del roster de un dispatcher con documentos de onboarding.
//! Se crea a través del flujo de invitación; los campos de identidad
//! son inmutables una vez onboarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Driver - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub dispatcher_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    // URLs a blob storage; el upload en sí queda fuera de este servicio
    pub license_url: Option<String>,
    pub insurance_url: Option<String>,
    pub w9_url: Option<String>,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
}
