pub mod request_id;

use axum::{
    extract::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{auth::AuthController, health};
use crate::error::AppError;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and middleware
pub fn create_router(config: Arc<Config>, auth_controller: Arc<AuthController>) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/token", post(AuthController::exchange_token))
        .route("/api/auth/logout", post(AuthController::logout))
        .with_state(auth_controller);

    Router::new()
        .route("/health", get(health::health))
        .with_state(config)
        .merge(auth_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    auth_controller: Arc<AuthController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    let app = create_router(config, auth_controller);

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Request span carrying the ID set by [`request_id_middleware`]
fn make_request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Any panic inside a handler is reported as an internal error
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(details).into_response()
}
