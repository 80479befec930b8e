//! Upload publisher service
//!
//! The upload-and-publish workflow: intake → publish → cleanup.
//!
//! Intake writes the uploaded bytes to `<scratch_dir>/<token>_img`. Publish
//! submits them to the asset provider as `editor/<token>_img`, looks up the
//! canonical URL (best effort) and builds the transformed delivery URL.
//! Cleanup removes the scratch file whatever the publish outcome was.

use std::sync::Arc;

use imgrelay_core::{
    asset_public_id, scratch_base_name, PublishError, PublishedAsset, TransformSpec, UploadedFile,
};
use imgrelay_services::AssetProvider;
use imgrelay_storage::{ScratchFile, ScratchStorage, StorageError};
use uuid::Uuid;

/// Runs the workflow for one request at a time; cheap to clone and share.
#[derive(Clone)]
pub struct UploadPublisher {
    scratch: ScratchStorage,
    provider: Arc<dyn AssetProvider>,
}

impl UploadPublisher {
    pub fn new(scratch: ScratchStorage, provider: Arc<dyn AssetProvider>) -> Self {
        Self { scratch, provider }
    }

    /// Complete workflow for one uploaded file.
    ///
    /// Intake, publish and cleanup all run on their own task: if the caller
    /// goes away and this future is dropped, the scratch file is still
    /// written, submitted and removed.
    pub async fn publish_upload(
        &self,
        token: Uuid,
        file: UploadedFile,
    ) -> Result<PublishedAsset, PublishError> {
        let publisher = self.clone();
        let task = tokio::spawn(async move { publisher.run(token, file).await });

        task.await.unwrap_or_else(|e| {
            Err(PublishError::UploadFailed(format!(
                "publish task failed: {}",
                e
            )))
        })
    }

    async fn run(&self, token: Uuid, file: UploadedFile) -> Result<PublishedAsset, PublishError> {
        let scratch = self.intake(token, &file).await?;

        let UploadedFile { content_type, data, .. } = file;
        drop(data);

        let result = self.publish(&scratch, &content_type).await;
        scratch.release().await;
        result
    }

    /// Write the uploaded bytes to a uniquely named scratch file.
    pub async fn intake(
        &self,
        token: Uuid,
        file: &UploadedFile,
    ) -> Result<ScratchFile, PublishError> {
        let base_name = scratch_base_name(&token);

        let scratch = self
            .scratch
            .write(&base_name, &file.data)
            .await
            .map_err(|e| match e {
                StorageError::DirectoryUnavailable { .. } => {
                    PublishError::StorageUnavailable(e.to_string())
                }
                _ => PublishError::WriteFailed(e.to_string()),
            })?;

        tracing::info!(
            scratch_path = %scratch.path().display(),
            original_filename = %file.original_filename,
            content_type = %file.content_type,
            size_bytes = file.content_length(),
            "Upload saved to scratch"
        );

        Ok(scratch)
    }

    /// Submit a scratch file to the provider and derive its delivery URL.
    ///
    /// The scratch file is left in place; releasing it is the caller's job.
    pub async fn publish(
        &self,
        scratch: &ScratchFile,
        content_type: &str,
    ) -> Result<PublishedAsset, PublishError> {
        let public_id = asset_public_id(scratch.base_name());

        let data = scratch
            .read()
            .await
            .map_err(|e| PublishError::UploadFailed(e.to_string()))?;

        self.provider
            .submit(&public_id, scratch.base_name(), content_type, data)
            .await
            .map_err(|e| PublishError::UploadFailed(e.to_string()))?;

        // Non-fatal: the delivery URL does not depend on the lookup.
        let canonical_url = match self.provider.lookup_canonical_url(&public_id).await {
            Ok(url) => {
                tracing::info!(public_id = %public_id, canonical_url = %url, "Asset canonical URL");
                Some(url)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    public_id = %public_id,
                    "Canonical URL lookup failed, continuing"
                );
                None
            }
        };

        let delivery_url = self
            .provider
            .build_transformed_url(&public_id, &TransformSpec::DELIVERY)
            .map_err(|e| PublishError::TransformFailed(e.to_string()))?;

        tracing::info!(
            public_id = %public_id,
            delivery_url = %delivery_url,
            "Asset published"
        );

        Ok(PublishedAsset {
            public_id,
            canonical_url,
            delivery_url,
        })
    }
}
