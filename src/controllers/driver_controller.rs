//! Controller del roster de drivers
//!
//! Los dispatchers invitan drivers por email; el onboarding consume la
//! invitación y deja al driver en el roster con sus documentos.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{DriverResponse, InviteDriverRequest, OnboardingRequest};
use crate::middleware::auth::AuthUser;
use crate::repositories::driver_repository::{DriverRepository, NewDriver};
use crate::repositories::token_repository::TokenRepository;
use crate::services::mailer_service::Mailer;
use crate::utils::errors::AppError;

const INVITE_TTL_DAYS: i64 = 7;

pub struct DriverController {
    drivers: DriverRepository,
    tokens: TokenRepository,
    mailer: Arc<dyn Mailer>,
    config: EnvironmentConfig,
}

impl DriverController {
    pub fn new(
        pool: sqlx::PgPool,
        mailer: Arc<dyn Mailer>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            tokens: TokenRepository::new(pool),
            mailer,
            config,
        }
    }

    /// Invitar un driver por email con un token de un solo uso
    pub async fn invite(
        &self,
        caller: &AuthUser,
        request: InviteDriverRequest,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        request.validate()?;

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(INVITE_TTL_DAYS);

        let invite = self
            .tokens
            .create_invite(caller.id, &request.email, &token, expires_at)
            .await?;

        let link = format!("{}/driver-onboarding?token={}", self.config.app_base_url, token);
        let mailer = self.mailer.clone();
        let email = request.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_driver_invite(&email, &link).await {
                tracing::warn!("⚠️ Envío de invitación falló: {}", e);
            }
        });

        tracing::info!("📨 Invitación {} para {}", invite.id, request.email);

        Ok(ApiResponse::success_with_message(
            serde_json::json!({ "invited": true }),
            "Invitación enviada".to_string(),
        ))
    }

    /// Completar el onboarding consumiendo la invitación
    pub async fn onboard(
        &self,
        request: OnboardingRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let invite = self
            .tokens
            .find_invite_by_token(&request.token)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invitación inválida".to_string()))?;

        if !invite.is_valid(Utc::now()) {
            return Err(AppError::BadRequest(
                "Invitación expirada o ya usada".to_string(),
            ));
        }

        if !self.tokens.consume_invite(invite.id).await? {
            return Err(AppError::Conflict("Invitación ya usada".to_string()));
        }

        let driver = self
            .drivers
            .create(NewDriver {
                dispatcher_id: invite.dispatcher_id,
                full_name: request.full_name,
                email: invite.email,
                phone: request.phone,
                license_url: request.license_url,
                insurance_url: request.insurance_url,
                w9_url: request.w9_url,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            DriverResponse::from(driver),
            "Onboarding completado".to_string(),
        ))
    }

    /// Roster del dispatcher autenticado
    pub async fn list(&self, caller: &AuthUser) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.drivers.list_by_dispatcher(caller.id).await?;
        Ok(drivers.into_iter().map(DriverResponse::from).collect())
    }
}
