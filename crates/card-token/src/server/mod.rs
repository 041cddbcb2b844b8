//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with the issue, validation and health routes.
//! - Require the issuer credential on `POST /tokens`.
//! - Inject shared application state (`AppState`) into handlers.
//! - Keep token-failure responses uniform regardless of cause.

pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
