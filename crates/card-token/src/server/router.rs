//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use super::{handlers, middleware, state::AppState};

/// Path prefix of the validation page; tokens follow as the last segment.
pub const VALIDATION_PATH: &str = "/cek-validasi";

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/tokens", post(handlers::issue_token))
        .route(
            &format!("{VALIDATION_PATH}/:token"),
            get(handlers::validate),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(middleware::trace_layer())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
