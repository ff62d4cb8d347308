//! Servicio de email transaccional
//!
//! Un método de envío por evento del ciclo de vida. Cada método recibe el
//! destinatario y un set fijo de campos. La política de entrega es
//! fire-and-forget: los callers hacen spawn del envío y loguean el fallo,
//! nunca lo propagan a la operación de negocio que lo disparó.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

/// Campos del load que viajan en los emails de lifecycle
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub load_id: String,
    pub route: String,
    pub pay_rate: Decimal,
    pub pickup_date: NaiveDate,
    pub dropoff_date: Option<NaiveDate>,
    pub broker_name: String,
    pub broker_mc: String,
}

/// Campos del requester que viajan en el email de "nuevo request"
#[derive(Debug, Clone)]
pub struct RequesterSummary {
    pub driver_name: String,
    pub company_name: String,
    pub mc_number: String,
    pub phone: String,
    pub truck_type: String,
    pub truck_location: String,
    pub counter_offer: Option<Decimal>,
}

/// Un envío por evento del ciclo de vida
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_request_created(
        &self,
        to: &str,
        load: &LoadSummary,
        requester: &RequesterSummary,
    ) -> Result<()>;

    async fn send_request_accepted(&self, to: &str, load: &LoadSummary) -> Result<()>;

    async fn send_request_declined(&self, to: &str, load: &LoadSummary) -> Result<()>;

    async fn send_load_canceled(&self, to: &str, load: &LoadSummary) -> Result<()>;

    async fn send_driver_invite(&self, to: &str, invite_link: &str) -> Result<()>;

    async fn send_otp(&self, to: &str, code: &str) -> Result<()>;

    async fn send_password_reset(&self, to: &str, reset_link: &str) -> Result<()>;

    async fn send_payment_reminder(
        &self,
        to: &str,
        full_name: &str,
        trial_ends_at: DateTime<Utc>,
    ) -> Result<()>;
}

/// Mailer contra la API HTTP del proveedor de email transaccional
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }

    /// Construir el payload JSON que espera el proveedor
    fn email_payload(from: &str, to: &str, subject: &str, text: &str) -> serde_json::Value {
        json!({
            "from": from,
            "to": [to],
            "subject": subject,
            "text": text,
        })
    }

    async fn send(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        log::info!("📧 Enviando email '{}' a {}", subject, to);

        let payload = Self::email_payload(&self.from, to, subject, text);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Envío de email falló con status {}: {}", status, error_text);
            return Err(anyhow!("Email send failed: {}", status));
        }

        log::info!("✅ Email '{}' enviado a {}", subject, to);
        Ok(())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_request_created(
        &self,
        to: &str,
        load: &LoadSummary,
        requester: &RequesterSummary,
    ) -> Result<()> {
        let counter = requester
            .counter_offer
            .map(|c| format!("\nCounter offer: ${}", c))
            .unwrap_or_default();
        let text = format!(
            "New booking request for your load {} ({}).\n\
             Driver: {} ({})\nMC: {}\nPhone: {}\nTruck: {} at {}\nPay rate: ${}{}",
            load.load_id,
            load.route,
            requester.driver_name,
            requester.company_name,
            requester.mc_number,
            requester.phone,
            requester.truck_type,
            requester.truck_location,
            load.pay_rate,
            counter,
        );
        self.send(to, "New load request", &text).await
    }

    async fn send_request_accepted(&self, to: &str, load: &LoadSummary) -> Result<()> {
        let dropoff = load
            .dropoff_date
            .map(|d| format!("\nDropoff date: {}", d))
            .unwrap_or_default();
        let text = format!(
            "Your request for load {} was accepted.\n\
             Route: {}\nPay rate: ${}\nPickup date: {}{}\n\
             Broker: {} (MC {})",
            load.load_id,
            load.route,
            load.pay_rate,
            load.pickup_date,
            dropoff,
            load.broker_name,
            load.broker_mc,
        );
        self.send(to, "Request accepted", &text).await
    }

    async fn send_request_declined(&self, to: &str, load: &LoadSummary) -> Result<()> {
        let text = format!(
            "Your request for load {} ({}) was declined by the broker.",
            load.load_id, load.route,
        );
        self.send(to, "Request declined", &text).await
    }

    async fn send_load_canceled(&self, to: &str, load: &LoadSummary) -> Result<()> {
        let text = format!(
            "Load {} ({}) was canceled by {} (MC {}).",
            load.load_id, load.route, load.broker_name, load.broker_mc,
        );
        self.send(to, "Load canceled", &text).await
    }

    async fn send_driver_invite(&self, to: &str, invite_link: &str) -> Result<()> {
        let text = format!(
            "You have been invited to join a dispatcher's roster.\n\
             Complete your onboarding here: {}",
            invite_link,
        );
        self.send(to, "Driver invitation", &text).await
    }

    async fn send_otp(&self, to: &str, code: &str) -> Result<()> {
        let text = format!("Your verification code is {}. It expires in 10 minutes.", code);
        self.send(to, "Verification code", &text).await
    }

    async fn send_password_reset(&self, to: &str, reset_link: &str) -> Result<()> {
        let text = format!("Reset your password here: {}", reset_link);
        self.send(to, "Password reset", &text).await
    }

    async fn send_payment_reminder(
        &self,
        to: &str,
        full_name: &str,
        trial_ends_at: DateTime<Utc>,
    ) -> Result<()> {
        let text = format!(
            "Hi {}, your free trial ends on {}. Add a payment method to keep your account active.",
            full_name,
            trial_ends_at.format("%Y-%m-%d"),
        );
        self.send(to, "Your trial is ending soon", &text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_payload_shape() {
        let payload = HttpMailer::email_payload(
            "no-reply@freightboard.app",
            "carrier@example.com",
            "Request accepted",
            "body",
        );
        assert_eq!(payload["from"], "no-reply@freightboard.app");
        assert_eq!(payload["to"][0], "carrier@example.com");
        assert_eq!(payload["subject"], "Request accepted");
        assert_eq!(payload["text"], "body");
    }
}
