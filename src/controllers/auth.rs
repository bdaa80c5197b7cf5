use axum::{body::Bytes, extract::State, Json};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    domain::auth::{
        LogoutRequest, LogoutResponse, TokenExchangeRequest, TokenExchangeResponse,
        TokenRelayService,
    },
    error::{AppError, AppResult},
};

pub const NO_JSON_BODY: &str = "No JSON body received";

pub struct AuthController {
    relay_service: Arc<TokenRelayService>,
}

impl AuthController {
    pub fn new(relay_service: Arc<TokenRelayService>) -> Self {
        Self { relay_service }
    }

    /// POST /api/auth/token - Exchange an authorization code for tokens
    ///
    /// The body is read raw so that a missing or malformed body yields the
    /// relay's own 400 payload instead of the extractor's rejection.
    pub async fn exchange_token(
        State(controller): State<Arc<AuthController>>,
        body: Bytes,
    ) -> AppResult<Json<TokenExchangeResponse>> {
        let object = parse_json_object(&body)
            .filter(|object| !object.is_empty())
            .ok_or_else(|| AppError::BadRequest(NO_JSON_BODY.to_string()))?;

        // Field-level problems surface from `into_grant`; this cannot fail
        let request = serde_json::from_value::<TokenExchangeRequest>(Value::Object(object))
            .unwrap_or_default();

        let response = controller.relay_service.exchange_token(request).await?;
        Ok(Json(response))
    }

    /// POST /api/auth/logout - Build the provider logout URL
    ///
    /// Lenient: an absent or unreadable body is treated as `{}`.
    pub async fn logout(
        State(controller): State<Arc<AuthController>>,
        body: Bytes,
    ) -> AppResult<Json<LogoutResponse>> {
        let request = match parse_json_object(&body) {
            Some(object) => serde_json::from_value::<LogoutRequest>(Value::Object(object))
                .unwrap_or_default(),
            None => LogoutRequest::default(),
        };

        Ok(Json(controller.relay_service.logout(request)))
    }
}

/// Parse a request body as a JSON object; anything else is `None`
fn parse_json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}
