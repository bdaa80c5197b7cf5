use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{AppError, AppResult};

pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Fields a token exchange request must carry. Reported in full on any miss.
pub const REQUIRED_EXCHANGE_FIELDS: [&str; 3] = ["code", "code_verifier", "redirect_uri"];

/// Profile returned by the provider's userinfo endpoint
pub type UserProfile = Map<String, Value>;

/// Token exchange request as sent by the client.
///
/// Every field is optional at this layer so that a missing, empty or
/// non-string value is reported through [`TokenExchangeRequest::into_grant`]
/// rather than as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct TokenExchangeRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub code_verifier: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub redirect_uri: Option<String>,
}

/// A validated authorization code grant, ready to forward to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationGrant {
    pub code: String,
    pub code_verifier: String,
    pub redirect_uri: String,
}

impl TokenExchangeRequest {
    pub fn into_grant(self) -> AppResult<AuthorizationGrant> {
        match (self.code, self.code_verifier, self.redirect_uri) {
            (Some(code), Some(code_verifier), Some(redirect_uri)) => Ok(AuthorizationGrant {
                code,
                code_verifier,
                redirect_uri,
            }),
            _ => Err(AppError::MissingParameters {
                required: REQUIRED_EXCHANGE_FIELDS
                    .iter()
                    .map(|field| field.to_string())
                    .collect(),
            }),
        }
    }
}

/// Body POSTed to the provider's token endpoint
#[derive(Serialize)]
pub struct ProviderTokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub code: &'a str,
    pub grant_type: &'a str,
    pub redirect_uri: &'a str,
    pub code_verifier: &'a str,
}

impl fmt::Debug for ProviderTokenRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderTokenRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("code", &self.code)
            .field("grant_type", &self.grant_type)
            .field("redirect_uri", &self.redirect_uri)
            .field("code_verifier", &self.code_verifier)
            .finish()
    }
}

/// Token payload returned by the provider. Unknown fields are ignored.
///
/// `expires_in` and `id_token` are relayed as whatever JSON the provider
/// sent (some providers send `expires_in` as a string). Only `access_token`
/// is typed, since it drives the userinfo call.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<Value>,
    pub id_token: Option<Value>,
}

/// Outcome of the best-effort userinfo lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(UserProfile),
    Unavailable(String),
}

/// Successful token exchange response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenExchangeResponse {
    pub success: bool,
    pub access_token: Option<String>,
    pub token_type: String,
    pub expires_in: Option<Value>,
    pub id_token: Option<Value>,
    pub user_info: UserProfile,
}

impl TokenExchangeResponse {
    pub fn from_provider(token: ProviderTokenResponse, user_info: UserProfile) -> Self {
        Self {
            success: true,
            access_token: token.access_token,
            token_type: token
                .token_type
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            expires_in: token.expires_in,
            id_token: token.id_token,
            user_info,
        }
    }
}

/// Logout request. Anything unusable in `return_to` counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub return_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logout_url: String,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
