//! Rutas de cron
//!
//! Jobs disparados por el scheduler externo con el secreto de cron.

use axum::{extract::State, middleware, routing::get, Json, Router};
use chrono::{Duration, Utc};

use crate::middleware::internal::cron_secret_middleware;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Días de anticipación del recordatorio de pago
const REMINDER_DAYS_AHEAD: i64 = 5;

pub fn create_cron_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/payment-reminders", get(payment_reminders))
        .route_layer(middleware::from_fn_with_state(
            state,
            cron_secret_middleware,
        ))
}

/// Recordatorio a las cuentas cuyo trial vence en 5 días. Corre una vez
/// por día; la ventana de 24h evita duplicados entre corridas.
async fn payment_reminders(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let now = Utc::now();
    let from = now + Duration::days(REMINDER_DAYS_AHEAD);
    let to = from + Duration::days(1);

    let users = UserRepository::new(state.pool.clone())
        .trial_ending_between(from, to)
        .await?;

    let total = users.len();
    tracing::info!("⏰ Payment reminders: {} cuentas en ventana", total);

    let mut sent = 0;
    for user in users {
        let Some(trial_ends_at) = user.trial_ends_at else {
            continue;
        };
        match state
            .mailer
            .send_payment_reminder(&user.email, &user.full_name, trial_ends_at)
            .await
        {
            Ok(()) => sent += 1,
            Err(e) => {
                tracing::warn!("⚠️ Reminder a {} falló: {}", user.email, e);
            }
        }
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "eligible": total,
        "sent": sent
    })))
}
