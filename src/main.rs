use std::sync::Arc;
use token_relay::controllers::auth::AuthController;
use token_relay::domain::auth::TokenRelayService;
use token_relay::infrastructure::config::{Config, LogFormat};
use token_relay::infrastructure::http::start_http_server;
use token_relay::infrastructure::oauth::Auth0Client;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting {} on {}:{}",
        config.service_name,
        config.host,
        config.port
    );

    // Requests still get served without provider settings; they fail upstream
    let missing = config.missing_provider_settings();
    if missing.is_empty() {
        tracing::info!(domain = %config.provider_domain, "Identity provider configured");
    } else {
        tracing::error!(
            missing = ?missing,
            "Identity provider is not configured; set the missing variables in the environment"
        );
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    tracing::info!("Instantiating identity provider client...");
    let provider = Arc::new(Auth0Client::from_config(&config)?);

    let relay_service = Arc::new(TokenRelayService::new(provider));
    let auth_controller = Arc::new(AuthController::new(relay_service));

    start_http_server(config, auth_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "token_relay=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "token_relay=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
