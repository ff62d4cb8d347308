//! Rutas de billing
//!
//! SetupIntent para guardar tarjeta y el webhook de Stripe que suspende
//! cuentas ante fallos de pago.

use axum::{
    extract::State,
    middleware,
    routing::post,
    Extension, Json, Router,
};

use crate::dto::billing_dto::{SetupIntentResponse, StripeWebhookEvent};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthUser};
use crate::repositories::user_repository::UserRepository;
use crate::services::billing_service::is_suspension_event;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_billing_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stripe/setup-intent", post(create_setup_intent))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        // Stripe llama sin sesión
        .route("/webhooks/stripe", post(stripe_webhook))
}

async fn create_setup_intent(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<SetupIntentResponse>>, AppError> {
    let billing = state.billing.clone().ok_or_else(|| {
        AppError::ExternalApi("Billing is not configured".to_string())
    })?;

    let users = UserRepository::new(state.pool.clone());
    let account = users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Crear el customer on-demand si el signup no lo dejó
    let customer_id = match account.stripe_customer_id {
        Some(id) => id,
        None => {
            let id = billing
                .create_customer(&account.email, &account.full_name)
                .await
                .map_err(|e| AppError::ExternalApi(format!("Stripe error: {}", e)))?;
            users.set_stripe_customer(account.id, &id).await?;
            id
        }
    };

    let client_secret = billing
        .create_setup_intent(&customer_id)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Stripe error: {}", e)))?;

    Ok(Json(ApiResponse::success(SetupIntentResponse {
        client_secret,
    })))
}

/// Webhook de Stripe. Los eventos de pago fallido o suscripción dada de
/// baja suspenden la cuenta; el resto se ignora con 200.
async fn stripe_webhook(
    State(state): State<AppState>,
    Json(event): Json<StripeWebhookEvent>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !is_suspension_event(&event.event_type) {
        return Ok(Json(serde_json::json!({ "received": true })));
    }

    let Some(customer_id) = event.data.object.customer else {
        tracing::warn!("⚠️ Webhook {} sin customer", event.event_type);
        return Ok(Json(serde_json::json!({ "received": true })));
    };

    let users = UserRepository::new(state.pool.clone());
    match users.suspend_by_stripe_customer(&customer_id).await? {
        Some(user) => {
            tracing::info!(
                "🚫 Cuenta {} suspendida por evento {}",
                user.id,
                event.event_type
            );
        }
        None => {
            tracing::warn!("⚠️ Webhook para customer desconocido {}", customer_id);
        }
    }

    Ok(Json(serde_json::json!({ "received": true })))
}
