//! Controller de autenticación
//!
//! Signup, login con sesión JWT, verificación OTP de email y el flujo de
//! reset de contraseña con tokens de un solo uso.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SendOtpRequest, SignupRequest,
    UserResponse, VerifyOtpRequest,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthUser;
use crate::models::user::UserRole;
use crate::repositories::token_repository::TokenRepository;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::services::billing_service::BillingService;
use crate::services::mailer_service::Mailer;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_session_token, JwtConfig};
use crate::utils::validation::validate_mc_number;

const OTP_TTL_MINUTES: i64 = 10;
const RESET_TTL_HOURS: i64 = 2;

pub struct AuthController {
    users: UserRepository,
    tokens: TokenRepository,
    mailer: Arc<dyn Mailer>,
    billing: Option<Arc<BillingService>>,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(
        pool: sqlx::PgPool,
        mailer: Arc<dyn Mailer>,
        billing: Option<Arc<BillingService>>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            tokens: TokenRepository::new(pool),
            mailer,
            billing,
            config,
        }
    }

    /// Registro. Carriers y dispatchers arrancan con trial; si Stripe
    /// está configurado se les crea el customer al registrarse.
    pub async fn signup(
        &self,
        request: SignupRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if request.role == UserRole::Admin {
            return Err(AppError::Forbidden(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        if let Some(mc) = &request.mc_number {
            validate_mc_number(mc).map_err(|_| {
                AppError::BadRequest("mc_number has an invalid format".to_string())
            })?;
        }

        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

        let now = Utc::now();
        let user = self
            .users
            .create(NewUser {
                role: request.role,
                full_name: request.full_name,
                email: request.email.to_lowercase(),
                phone: request.phone,
                mc_number: request.mc_number,
                company_name: request.company_name,
                password_hash,
                trial_ends_at: request.role.trial_ends_at(now),
            })
            .await?;

        tracing::info!("👤 Usuario {} registrado como {}", user.id, user.role);

        // El customer de Stripe se crea best-effort; si falla, el signup
        // sigue y el customer se crea al pedir el setup intent
        if let Some(billing) = &self.billing {
            match billing.create_customer(&user.email, &user.full_name).await {
                Ok(customer_id) => {
                    self.users.set_stripe_customer(user.id, &customer_id).await?;
                }
                Err(e) => {
                    tracing::warn!("⚠️ No se pudo crear el customer de Stripe: {}", e);
                }
            }
        }

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Cuenta creada exitosamente".to_string(),
        ))
    }

    /// Login. Devuelve el token de sesión; la capa de rutas lo emite
    /// como cookie HTTP-only.
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<(String, UserResponse), AppError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        if !user.active {
            return Err(AppError::Forbidden(
                "La cuenta está suspendida por falta de pago".to_string(),
            ));
        }

        let jwt_config = JwtConfig::from(&self.config);
        let token = generate_session_token(user.id, &user.role.to_string(), &jwt_config)?;

        tracing::info!("🔐 Login de {} ({})", user.email, user.role);

        Ok((token, UserResponse::from(user)))
    }

    pub async fn me(&self, caller: &AuthUser) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Enviar un código OTP de verificación de email
    pub async fn send_otp(
        &self,
        request: SendOtpRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

        self.tokens
            .create_otp(&request.email, &code, expires_at)
            .await?;

        let mailer = self.mailer.clone();
        let email = request.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_otp(&email, &code).await {
                tracing::warn!("⚠️ Envío de OTP falló: {}", e);
            }
        });

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "sent": true }),
            "Código enviado".to_string(),
        ))
    }

    /// Verificar un código OTP. El código se consume al primer uso.
    pub async fn verify_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        let otp = self
            .tokens
            .find_otp(&request.email, &request.code)
            .await?
            .ok_or_else(|| AppError::BadRequest("Código inválido".to_string()))?;

        if !otp.is_valid(Utc::now()) {
            return Err(AppError::BadRequest("Código expirado o ya usado".to_string()));
        }

        if !self.tokens.consume_otp(otp.id).await? {
            // Dos verificaciones concurrentes: solo una pasa
            return Err(AppError::Conflict("Código ya usado".to_string()));
        }

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "verified": true }),
            "Email verificado".to_string(),
        ))
    }

    /// Iniciar el reset de contraseña. La respuesta es la misma exista o
    /// no la cuenta, para no filtrar emails registrados.
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        if let Some(user) = self.users.find_by_email(&request.email).await? {
            let token = Uuid::new_v4().to_string();
            let expires_at = Utc::now() + Duration::hours(RESET_TTL_HOURS);

            self.tokens.create_reset(user.id, &token, expires_at).await?;

            let link = format!("{}/reset-password?token={}", self.config.app_base_url, token);
            let mailer = self.mailer.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_password_reset(&user.email, &link).await {
                    tracing::warn!("⚠️ Envío de reset falló: {}", e);
                }
            });
        }

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "sent": true }),
            "Si la cuenta existe, se envió un email de reset".to_string(),
        ))
    }

    /// Completar el reset con el token de un solo uso
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let reset = self
            .tokens
            .find_reset_by_token(&request.token)
            .await?
            .ok_or_else(|| AppError::BadRequest("Token inválido".to_string()))?;

        if !reset.is_valid(Utc::now()) {
            return Err(AppError::BadRequest("Token expirado o ya usado".to_string()));
        }

        if !self.tokens.consume_reset(reset.id).await? {
            return Err(AppError::Conflict("Token ya usado".to_string()));
        }

        let password_hash = bcrypt::hash(&request.new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

        self.users.set_password(reset.user_id, &password_hash).await?;

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "reset": true }),
            "Contraseña actualizada".to_string(),
        ))
    }
}
