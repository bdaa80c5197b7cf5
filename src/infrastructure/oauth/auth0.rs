use async_trait::async_trait;
use std::time::Duration;

use super::provider::{IdentityProvider, ProviderError};
use crate::domain::auth::{
    AuthorizationGrant, ProfileLookup, ProviderTokenRequest, ProviderTokenResponse, UserProfile,
    AUTHORIZATION_CODE_GRANT,
};
use crate::infrastructure::config::{ClientSecret, Config};

const TOKEN_PATH: &str = "/oauth/token";
const USERINFO_PATH: &str = "/userinfo";
const LOGOUT_PATH: &str = "/v2/logout";

/// HTTP client for an Auth0-style tenant
pub struct Auth0Client {
    base_url: String,
    client_id: String,
    client_secret: ClientSecret,
    http_client: reqwest::Client,
}

impl Auth0Client {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: ClientSecret,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: strip_trailing_slash(base_url.into()),
            client_id: client_id.into(),
            client_secret,
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(
            config.provider_base_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            config.provider_timeout,
        )
    }

    /// Provider URL for `path`. A base URL without a host is refused here,
    /// since `https:///oauth/token` would otherwise parse with `oauth` as host.
    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ProviderError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{:?}: {}", self.base_url, e)))?;
        if base.host_str().map_or(true, str::is_empty) {
            return Err(ProviderError::InvalidBaseUrl(format!(
                "{:?}: missing host",
                self.base_url
            )));
        }

        reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{:?}: {}", self.base_url, e)))
    }
}

/// Drop one trailing slash, but only after a non-empty authority
fn strip_trailing_slash(base_url: String) -> String {
    let has_host = base_url
        .split_once("://")
        .map_or(false, |(_, rest)| rest.len() > 1);

    match base_url.strip_suffix('/') {
        Some(stripped) if has_host => stripped.to_string(),
        _ => base_url,
    }
}

#[async_trait]
impl IdentityProvider for Auth0Client {
    async fn exchange_code(
        &self,
        grant: &AuthorizationGrant,
    ) -> Result<ProviderTokenResponse, ProviderError> {
        let payload = ProviderTokenRequest {
            client_id: &self.client_id,
            client_secret: self.client_secret.expose(),
            code: &grant.code,
            grant_type: AUTHORIZATION_CODE_GRANT,
            redirect_uri: &grant.redirect_uri,
            code_verifier: &grant.code_verifier,
        };

        let response = self
            .http_client
            .post(self.endpoint(TOKEN_PATH)?)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status { status, body });
        }

        response
            .json::<ProviderTokenResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn fetch_user_info(&self, access_token: &str) -> ProfileLookup {
        let url = match self.endpoint(USERINFO_PATH) {
            Ok(url) => url,
            Err(e) => return ProfileLookup::Unavailable(e.to_string()),
        };

        let response = match self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ProfileLookup::Unavailable(format!("userinfo request failed: {}", e)),
        };

        if response.status() != reqwest::StatusCode::OK {
            return ProfileLookup::Unavailable(format!(
                "userinfo returned {}",
                response.status()
            ));
        }

        match response.json::<UserProfile>().await {
            Ok(profile) => ProfileLookup::Found(profile),
            Err(e) => ProfileLookup::Unavailable(format!("malformed userinfo body: {}", e)),
        }
    }

    fn logout_url(&self, return_to: Option<&str>) -> String {
        let mut url = format!(
            "{}{}?client_id={}",
            self.base_url,
            LOGOUT_PATH,
            urlencoding::encode(&self.client_id)
        );

        if let Some(return_to) = return_to.filter(|r| !r.is_empty()) {
            url.push_str("&returnTo=");
            url.push_str(&urlencoding::encode(return_to));
        }

        url
    }
}
