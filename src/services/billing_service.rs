//! Servicio de billing (Stripe)
//!
//! Alta de customer y creación de SetupIntent para guardar tarjeta.
//! Los webhooks se procesan en la capa de rutas; acá solo viven las
//! llamadas salientes a la API de Stripe.

use anyhow::{anyhow, Result};
use serde::Deserialize;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize)]
struct StripeCustomer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeSetupIntent {
    client_secret: String,
}

pub struct BillingService {
    secret_key: String,
    client: reqwest::Client,
}

impl BillingService {
    pub fn new(secret_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, secret_key }
    }

    /// Crear un customer de Stripe para la cuenta
    pub async fn create_customer(&self, email: &str, full_name: &str) -> Result<String> {
        log::info!("💳 Creando customer de Stripe para {}", email);

        let response = self
            .client
            .post(format!("{}/customers", STRIPE_API_URL))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[("email", email), ("name", full_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Stripe customer falló con status {}: {}", status, error_text);
            return Err(anyhow!("Stripe customer creation failed: {}", status));
        }

        let customer: StripeCustomer = response.json().await?;
        Ok(customer.id)
    }

    /// Crear un SetupIntent para guardar una tarjeta on-file
    pub async fn create_setup_intent(&self, customer_id: &str) -> Result<String> {
        log::info!("💳 Creando SetupIntent para customer {}", customer_id);

        let response = self
            .client
            .post(format!("{}/setup_intents", STRIPE_API_URL))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("customer", customer_id),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ SetupIntent falló con status {}: {}", status, error_text);
            return Err(anyhow!("Stripe setup intent failed: {}", status));
        }

        let intent: StripeSetupIntent = response.json().await?;
        Ok(intent.client_secret)
    }
}

/// Eventos de webhook que suspenden la cuenta
pub fn is_suspension_event(event_type: &str) -> bool {
    matches!(
        event_type,
        "invoice.payment_failed" | "customer.subscription.deleted"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspension_events() {
        assert!(is_suspension_event("invoice.payment_failed"));
        assert!(is_suspension_event("customer.subscription.deleted"));
        assert!(!is_suspension_event("invoice.paid"));
        assert!(!is_suspension_event("customer.created"));
    }
}
