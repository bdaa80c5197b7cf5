use async_trait::async_trait;

use crate::domain::auth::{AuthorizationGrant, ProfileLookup, ProviderTokenResponse};
use crate::error::AppError;

/// Failure talking to the identity provider's token endpoint
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to identity provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("identity provider base URL is unusable: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to parse identity provider response: {0}")]
    Decode(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// OAuth2/OIDC identity provider the relay forwards to.
///
/// Implementations own the confidential client credentials; callers only
/// hand over what the end user supplied.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code (plus PKCE verifier) for tokens
    async fn exchange_code(
        &self,
        grant: &AuthorizationGrant,
    ) -> Result<ProviderTokenResponse, ProviderError>;

    /// Look up the user's profile. Never fails; an unusable lookup is
    /// reported as [`ProfileLookup::Unavailable`].
    async fn fetch_user_info(&self, access_token: &str) -> ProfileLookup;

    /// URL that ends the user's session at the provider
    fn logout_url(&self, return_to: Option<&str>) -> String;
}
