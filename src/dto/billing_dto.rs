use serde::{Deserialize, Serialize};

// Response de creación de SetupIntent
#[derive(Debug, Serialize)]
pub struct SetupIntentResponse {
    pub client_secret: String,
}

// Evento de webhook de Stripe (solo los campos que usamos)
#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: StripeEventObject,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventObject {
    pub customer: Option<String>,
}
