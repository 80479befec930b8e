//! Application state shared by all handlers.
//!
//! Everything here is read-only after startup; requests share no mutable state.

use crate::services::publisher::UploadPublisher;

#[derive(Clone)]
pub struct AppState {
    pub publisher: UploadPublisher,
}
