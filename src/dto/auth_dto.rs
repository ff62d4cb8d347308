use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole};

// Request de signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    pub role: UserRole,

    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    pub phone: Option<String>,
    pub mc_number: Option<String>,
    pub company_name: Option<String>,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Request para enviar un OTP de verificación
#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: String,
}

// Request para verificar un OTP
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

// Request de forgot password
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

// Request de reset password con token de un solo uso
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,

    #[validate(length(min = 8, max = 100))]
    pub new_password: String,
}

// Response de usuario (sin password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub role: UserRole,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mc_number: Option<String>,
    pub company_name: Option<String>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            mc_number: user.mc_number,
            company_name: user.company_name,
            trial_ends_at: user.trial_ends_at,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
