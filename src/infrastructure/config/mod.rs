use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_SERVICE_NAME: &str = "Token Relay";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub service_name: String,
    // Identity provider
    pub provider_domain: String,
    pub provider_base_url: String,
    pub client_id: String,
    pub client_secret: ClientSecret,
    pub provider_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Client secret shared with the identity provider. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw secret. Callers must avoid logging this string.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
    }
}

impl fmt::Display for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Config {
    /// Reads the process environment once. Missing provider settings are not
    /// an error here; see [`Config::missing_provider_settings`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let provider_domain = env::var("AUTH0_DOMAIN").unwrap_or_default();
        let provider_base_url = env::var("AUTH0_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| provider_base_url_for(&provider_domain));

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            provider_domain,
            provider_base_url,
            client_id: env::var("AUTH0_CLIENT_ID").unwrap_or_default(),
            client_secret: ClientSecret::new(env::var("AUTH0_CLIENT_SECRET").unwrap_or_default()),
            provider_timeout: Duration::from_secs(
                env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|secs| secs.parse().ok())
                    .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            ),
        };

        Ok(config)
    }

    /// Names of the provider variables that were left unset or empty.
    pub fn missing_provider_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.provider_domain.is_empty() {
            missing.push("AUTH0_DOMAIN");
        }
        if self.client_id.is_empty() {
            missing.push("AUTH0_CLIENT_ID");
        }
        if self.client_secret.is_empty() {
            missing.push("AUTH0_CLIENT_SECRET");
        }
        missing
    }
}

pub fn provider_base_url_for(domain: &str) -> String {
    format!("https://{}", domain)
}
