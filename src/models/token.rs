//! Modelos de tokens de un solo uso
//!
//! Invitaciones de drivers, códigos OTP y tokens de reset de contraseña.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invitación de driver emitida por un dispatcher
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverInvite {
    pub id: Uuid,
    pub dispatcher_id: Uuid,
    pub email: String,
    pub token: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DriverInvite {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

/// Código OTP de verificación de email
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OtpCode {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub consumed: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && now < self.expires_at
    }
}

/// Token de reset de contraseña
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_invite_validity() {
        let now = Utc::now();
        let invite = DriverInvite {
            id: Uuid::new_v4(),
            dispatcher_id: Uuid::new_v4(),
            email: "driver@example.com".to_string(),
            token: "tok".to_string(),
            used: false,
            expires_at: now + Duration::days(7),
            created_at: now,
        };
        assert!(invite.is_valid(now));
        assert!(!invite.is_valid(now + Duration::days(8)));

        let used = DriverInvite { used: true, ..invite };
        assert!(!used.is_valid(now));
    }
}
