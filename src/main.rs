use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use freight_board::cache;
use freight_board::cache::redis_client::RedisClient;
use freight_board::config::environment::EnvironmentConfig;
use freight_board::database::create_pool;
use freight_board::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use freight_board::middleware::rate_limit::RateLimitState;
use freight_board::routes;
use freight_board::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Freight Board - API del load board");
    info!("=====================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar Redis para el cache geo
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = cache::CacheConfig {
        redis_url,
        default_ttl: 3600,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let server_url = config.server_url();
    let limiter = RateLimitState::new(&config);
    let app_state = AppState::new(pool, config, redis_client);

    let app = Router::new()
        .merge(routes::create_health_router())
        .nest("/api", routes::create_api_router(app_state.clone(), limiter))
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = server_url.parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📦 Loads:");
    info!("   POST  /api/loads - Publicar load");
    info!("   GET   /api/loads - Buscar loads");
    info!("   GET   /api/loads/:id - Obtener load");
    info!("   PATCH /api/loads/:id - Editar load (status=canceled cancela)");
    info!("   DELETE /api/loads/:id - Eliminar load");
    info!("   GET   /api/loads/:id/requests - Requests de un load");
    info!("🤝 Booking requests:");
    info!("   POST  /api/requests - Someter request");
    info!("   GET   /api/requests - Listar requests (secreto interno)");
    info!("   GET   /api/requests/:id - Obtener request");
    info!("   PATCH /api/requests/:id - Aceptar o declinar");
    info!("🚛 Trucks:");
    info!("   POST  /api/trucks - Publicar truck");
    info!("   GET   /api/trucks - Buscar trucks");
    info!("   POST  /api/trucks/:id/hire - Contratar truck");
    info!("   DELETE /api/trucks/:id - Eliminar truck");
    info!("💬 Mensajes:");
    info!("   POST  /api/messages - Enviar mensaje");
    info!("   GET   /api/messages - Hilo de un load");
    info!("   PATCH /api/messages - Marcar leídos");
    info!("🔐 Auth:");
    info!("   POST  /api/auth/signup | login | logout");
    info!("   GET   /api/auth/me");
    info!("   POST  /api/auth/send-otp | verify-otp");
    info!("   POST  /api/auth/forgot-password | reset-password");
    info!("🧑‍✈️ Drivers:");
    info!("   POST  /api/invite - Invitar driver");
    info!("   POST  /api/onboarding - Onboarding con token");
    info!("   GET   /api/drivers - Roster del dispatcher");
    info!("🗺️ Geo (secreto interno):");
    info!("   GET   /api/here/autocomplete | geocode | distance");
    info!("💳 Billing:");
    info!("   POST  /api/stripe/setup-intent - Guardar tarjeta");
    info!("   POST  /api/webhooks/stripe - Webhook de Stripe");
    info!("⏰ Cron (secreto de cron):");
    info!("   GET   /api/cron/payment-reminders - Recordatorios de trial");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
