//! imgrelay API Library
//!
//! This crate provides the HTTP handlers, middleware, the upload publisher
//! service and application setup.

mod handlers;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::publisher::UploadPublisher;
pub use state::AppState;
