use actix_web::{middleware::Logger, web, HttpServer};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use otp_api::app::create_app;
use otp_api::routes::otp::AppState;
use otp_core::services::{OtpService, OtpServiceConfig, TokenSweeper};
use otp_infra::{create_sms_service, load_config, FileTokenStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration; it also decides the default log level
    let config = load_config()?;

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.default_log_filter()),
    );

    info!("Starting OTP SMS service ({})", config.environment);

    if config.uses_mock_in_production() {
        warn!("Mock SMS provider configured in production; tokens will not be delivered");
    }

    // Wire the token store, SMS dispatcher and OTP service together
    let store = Arc::new(FileTokenStore::open(&config.store).await?);
    let dispatcher = create_sms_service(&config.sms)?;
    let otp_service = Arc::new(OtpService::new(
        store.clone(),
        dispatcher,
        OtpServiceConfig::from_sms_config(&config.sms),
    ));

    let sweeper = store.ttl().map(|ttl| {
        info!("Tokens expire after {} seconds", ttl.num_seconds());
        Arc::new(TokenSweeper::new(
            store.clone(),
            ttl,
            Duration::from_secs(config.store.sweep_interval_secs),
        ))
        .start_background_task()
    });

    let app_state = web::Data::new(AppState::new(otp_service, &config));

    let bind_address = config.server.bind_address();
    info!(
        "{} listening on {} under {}",
        config.sms.service_name,
        bind_address,
        config.server.scope_path()
    );

    let mut server = HttpServer::new(move || create_app(app_state.clone()).wrap(Logger::default()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    Ok(())
}
