pub mod dto;
pub mod service;

pub use dto::{
    AuthorizationGrant, LogoutRequest, LogoutResponse, ProfileLookup, ProviderTokenRequest,
    ProviderTokenResponse, TokenExchangeRequest, TokenExchangeResponse, UserProfile,
    AUTHORIZATION_CODE_GRANT, DEFAULT_TOKEN_TYPE, REQUIRED_EXCHANGE_FIELDS,
};
pub use service::TokenRelayService;
