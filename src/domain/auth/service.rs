use std::sync::Arc;

use super::{
    LogoutRequest, LogoutResponse, ProfileLookup, TokenExchangeRequest, TokenExchangeResponse,
    UserProfile,
};
use crate::{error::AppResult, infrastructure::oauth::IdentityProvider};

pub struct TokenRelayService {
    provider: Arc<dyn IdentityProvider>,
}

impl TokenRelayService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Exchange an authorization code for tokens and attach the user's
    /// profile when the provider hands one out
    pub async fn exchange_token(
        &self,
        request: TokenExchangeRequest,
    ) -> AppResult<TokenExchangeResponse> {
        let grant = request.into_grant()?;

        tracing::info!(
            redirect_uri = %grant.redirect_uri,
            "Exchanging authorization code with identity provider"
        );
        let token = self.provider.exchange_code(&grant).await?;
        tracing::info!("Token obtained from identity provider");

        let user_info = match token.access_token.as_deref() {
            Some(access_token) => self.lookup_profile(access_token).await,
            None => UserProfile::new(),
        };

        Ok(TokenExchangeResponse::from_provider(token, user_info))
    }

    async fn lookup_profile(&self, access_token: &str) -> UserProfile {
        match self.provider.fetch_user_info(access_token).await {
            ProfileLookup::Found(profile) => {
                tracing::info!(
                    email = profile
                        .get("email")
                        .and_then(|email| email.as_str())
                        .unwrap_or("unknown"),
                    "User profile retrieved"
                );
                profile
            }
            ProfileLookup::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "Could not retrieve user profile");
                UserProfile::new()
            }
        }
    }

    /// Build the provider logout URL
    pub fn logout(&self, request: LogoutRequest) -> LogoutResponse {
        tracing::info!(
            return_to_supplied = request.return_to.is_some(),
            "Building provider logout URL"
        );

        LogoutResponse {
            logout_url: self.provider.logout_url(request.return_to.as_deref()),
        }
    }
}
