use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use token_relay::{
    controllers::auth::AuthController,
    domain::auth::TokenRelayService,
    infrastructure::{
        config::{provider_base_url_for, ClientSecret, Config, Environment, LogFormat},
        http::create_router,
        oauth::Auth0Client,
    },
};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub mod assertions;

use api_client::TestClient;

pub const TEST_CLIENT_ID: &str = "test_client_id";
pub const TEST_CLIENT_SECRET: &str = "test_client_secret_never_echoed";
pub const TEST_DOMAIN: &str = "tenant.example.com";

/// Relay wired to a wiremock identity provider
pub struct TestContext {
    pub client: TestClient,
    pub mock_server: MockServer,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let mock_server = MockServer::start().await;

            let config = Config {
                provider_base_url: mock_server.uri(),
                ..test_config()
            };

            let client = spawn_app(config.clone())
                .await
                .expect("Failed to start relay");

            Self {
                client,
                mock_server,
                config,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

/// Configuration for a fully configured tenant; callers override the base URL
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        service_name: "Token Relay".to_string(),
        provider_domain: TEST_DOMAIN.to_string(),
        provider_base_url: format!("https://{}", TEST_DOMAIN),
        client_id: TEST_CLIENT_ID.to_string(),
        client_secret: ClientSecret::new(TEST_CLIENT_SECRET),
        provider_timeout: Duration::from_secs(2),
    }
}

/// Configuration with none of the provider settings present
pub fn unconfigured_config() -> Config {
    Config {
        provider_domain: String::new(),
        provider_base_url: provider_base_url_for(""),
        client_id: String::new(),
        client_secret: ClientSecret::new(""),
        ..test_config()
    }
}

/// Serve the relay on an ephemeral port and return a client for it
pub async fn spawn_app(config: Config) -> anyhow::Result<TestClient> {
    let config = Arc::new(config);

    let provider = Arc::new(Auth0Client::from_config(&config)?);
    let relay_service = Arc::new(TokenRelayService::new(provider));
    let auth_controller = Arc::new(AuthController::new(relay_service));
    let app = create_router(config, auth_controller);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(TestClient::new(&format!("http://{}", addr)))
}
