//! Asset provider abstraction
//!
//! The narrow set of remote capabilities the publish workflow consumes.

use async_trait::async_trait;
use imgrelay_core::TransformSpec;
use thiserror::Error;

/// Asset provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider transport error: {0}")]
    Transport(String),

    #[error("Provider rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Invalid asset identifier: {0}")]
    InvalidIdentifier(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Remote asset store capabilities
///
/// Implementations are shared across requests behind `Arc<dyn AssetProvider>`
/// and must not hold per-request state.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Store `data` under `public_id`. Re-submitting an identifier overwrites it.
    ///
    /// After an error the identifier must not be assumed to exist remotely.
    async fn submit(
        &self,
        public_id: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ProviderResult<()>;

    /// Look up the canonical secure URL of a stored asset.
    async fn lookup_canonical_url(&self, public_id: &str) -> ProviderResult<String>;

    /// Build the delivery URL of `public_id` with `spec` applied.
    ///
    /// Deterministic for a given identifier and spec; performs no I/O.
    fn build_transformed_url(&self, public_id: &str, spec: &TransformSpec)
        -> ProviderResult<String>;
}
