//! Service construction

use std::sync::Arc;

use anyhow::Result;
use imgrelay_core::Config;
use imgrelay_services::{AssetProvider, CloudinaryClient};
use imgrelay_storage::ScratchStorage;

use crate::services::publisher::UploadPublisher;
use crate::state::AppState;

/// Build the Cloudinary client once for the lifetime of the process.
pub fn setup_provider(config: &Config) -> Result<Arc<dyn AssetProvider>> {
    let client = CloudinaryClient::new(config.cloudinary.clone())?;
    tracing::info!(client = ?client, "Cloudinary client initialized");
    Ok(Arc::new(client))
}

/// Assemble application state around an asset provider.
pub fn initialize_state(config: &Config, provider: Arc<dyn AssetProvider>) -> Arc<AppState> {
    let scratch = ScratchStorage::new(config.uploads_dir());
    Arc::new(AppState {
        publisher: UploadPublisher::new(scratch, provider),
    })
}
