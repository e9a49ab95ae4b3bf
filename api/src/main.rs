use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use snip_api::app::create_app;
use snip_api::cookies::CookieSettings;
use snip_api::routes::auth::AppState;
use snip_api::telemetry::init_tracing;
use snip_core::services::{JwtCodec, TokenManager, TokenServiceConfig};
use snip_infra::{RedisClient, RedisWhitelistStore};
use snip_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Snip API server");

    if config.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("JWT_SECRET is not set, using the development default");
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt)
        .context("invalid token configuration")?;
    let codec = JwtCodec::new(token_config).context("failed to build token codec")?;

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;
    if !redis.health_check().await.unwrap_or(false) {
        warn!("Redis health check did not return PONG");
    }
    let store = RedisWhitelistStore::new(redis);

    let tokens = Arc::new(TokenManager::new(codec, store));
    let state = web::Data::new(AppState::new(tokens, CookieSettings::from_config(&config)));

    let bind_address = config.server.bind_address();
    let environment = config.environment;
    let cors_max_age = config.server.cors_max_age;
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), environment, cors_max_age));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}
