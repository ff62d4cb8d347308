//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::geo_cache::GeoCache;
use crate::cache::redis_client::RedisClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::billing_service::BillingService;
use crate::services::geo_service::GeoService;
use crate::services::mailer_service::{HttpMailer, Mailer};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub mailer: Arc<dyn Mailer>,
    // Solo si HERE_API_KEY está configurada
    pub geo: Option<Arc<GeoService>>,
    // Solo si STRIPE_SECRET_KEY está configurada
    pub billing: Option<Arc<BillingService>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: RedisClient) -> Self {
        let mailer: Arc<dyn Mailer> = Arc::new(HttpMailer::new(
            config.email_api_url.clone(),
            config.email_api_key.clone(),
            config.email_from.clone(),
        ));

        let geo = config.here_api_key.clone().map(|api_key| {
            Arc::new(GeoService::new(api_key, GeoCache::new(redis)))
        });

        let billing = config
            .stripe_secret_key
            .clone()
            .map(|key| Arc::new(BillingService::new(key)));

        Self {
            pool,
            config,
            mailer,
            geo,
            billing,
        }
    }
}
