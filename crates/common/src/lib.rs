//! Shared protocol types and errors for the `card-token` service.

pub mod error;
pub mod protocol;

pub use error::{ServiceError, INVALID_TOKEN_MESSAGE};
