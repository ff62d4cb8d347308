//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    // Proveedor de geocoding (HERE Maps)
    pub here_api_key: Option<String>,
    // Proveedor de email transaccional
    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from: String,
    // Billing (Stripe)
    pub stripe_secret_key: Option<String>,
    // Secretos para llamadas server-to-server y cron
    pub internal_api_secret: String,
    pub cron_secret: String,
    // URL pública de la app (links de invitación y reset)
    pub app_base_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .expect("JWT_EXPIRATION must be set")
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .expect("CORS_ORIGINS must be set")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .expect("RATE_LIMIT_REQUESTS must be set")
                .parse()
                .expect("RATE_LIMIT_REQUESTS must be a valid number"),
            rate_limit_window: env::var("RATE_LIMIT_WINDOW")
                .expect("RATE_LIMIT_WINDOW must be set")
                .parse()
                .expect("RATE_LIMIT_WINDOW must be a valid number"),
            here_api_key: env::var("HERE_API_KEY").ok(),
            email_api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            email_api_key: env::var("EMAIL_API_KEY").expect("EMAIL_API_KEY must be set"),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@freightboard.app".to_string()),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").ok(),
            internal_api_secret: env::var("INTERNAL_API_SECRET")
                .expect("INTERNAL_API_SECRET must be set"),
            cron_secret: env::var("CRON_SECRET").expect("CRON_SECRET must be set"),
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
