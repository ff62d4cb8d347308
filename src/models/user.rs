//! Modelo de User
//!
//! Cuentas del sistema con rol, enlace a billing y flag de suspensión.
//! Los brokers no tienen trial; carriers y dispatchers reciben 3 días.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Días de trial para carriers y dispatchers
pub const TRIAL_DAYS: i64 = 3;

/// Rol de una cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Broker,
    Dispatcher,
    Carrier,
}

impl UserRole {
    /// Los brokers publican gratis; carriers y dispatchers pagan tras el trial
    pub fn has_trial(&self) -> bool {
        matches!(self, UserRole::Carrier | UserRole::Dispatcher)
    }

    /// Calcular fin de trial para un signup nuevo
    pub fn trial_ends_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.has_trial().then(|| now + Duration::days(TRIAL_DAYS))
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Broker => write!(f, "broker"),
            UserRole::Dispatcher => write!(f, "dispatcher"),
            UserRole::Carrier => write!(f, "carrier"),
        }
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub role: UserRole,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mc_number: Option<String>,
    pub company_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub stripe_customer_id: Option<String>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brokers_have_no_trial() {
        let now = Utc::now();
        assert!(UserRole::Broker.trial_ends_at(now).is_none());
        assert!(UserRole::Admin.trial_ends_at(now).is_none());
    }

    #[test]
    fn test_carrier_and_dispatcher_get_three_days() {
        let now = Utc::now();
        for role in [UserRole::Carrier, UserRole::Dispatcher] {
            let ends = role.trial_ends_at(now).unwrap();
            assert_eq!(ends - now, Duration::days(TRIAL_DAYS));
        }
    }
}
