//! Cloudinary asset provider
//!
//! Upload API: `POST {api_base}/v1_1/{cloud}/image/upload` (signed multipart)
//! Admin API: `GET {api_base}/v1_1/{cloud}/resources/image/upload/{public_id}` (basic auth)
//! Delivery: `{delivery_base}/{cloud}/image/upload/{transformation}/v1/{public_id}`

use std::fmt::{Debug, Formatter, Result as FmtResult};

use anyhow::Context;
use async_trait::async_trait;
use imgrelay_core::{CloudinaryConfig, TransformSpec};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::provider::{AssetProvider, ProviderError, ProviderResult};

/// Longest provider error body carried into logs
const MAX_ERROR_BODY_LEN: usize = 512;

/// Cloudinary client, built once from configuration and shared across requests
pub struct CloudinaryClient {
    http_client: reqwest::Client,
    config: CloudinaryConfig,
}

impl Debug for CloudinaryClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryClient")
            .field("cloud_name", &self.config.cloud_name)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    public_id: String,
    #[serde(default)]
    version: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AssetApiResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client for Cloudinary")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn upload_endpoint(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base_url, self.config.cloud_name
        )
    }

    fn resource_endpoint(&self, public_id: &str) -> String {
        format!(
            "{}/v1_1/{}/resources/image/upload/{}",
            self.config.api_base_url, self.config.cloud_name, public_id
        )
    }

    /// Sign upload parameters: parameters sorted by name, joined as
    /// `k=v&k=v`, followed by the API secret, SHA-256 hex encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let mut body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if body.len() > MAX_ERROR_BODY_LEN {
            let mut end = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }
        ProviderError::Rejected { status, body }
    }
}

/// Identifiers are interpolated into URL paths unescaped, so only a
/// conservative character set is accepted.
fn validate_public_id(public_id: &str) -> ProviderResult<()> {
    let valid_chars = public_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'));

    if public_id.is_empty()
        || !valid_chars
        || public_id.starts_with('/')
        || public_id.ends_with('/')
        || public_id.contains("..")
        || public_id.contains("//")
    {
        return Err(ProviderError::InvalidIdentifier(public_id.to_string()));
    }
    Ok(())
}

/// Client-sent content types are forwarded only when they look like `type/subtype`.
fn mime_or_default(content_type: &str) -> &str {
    let is_token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
    };
    match content_type.split_once('/') {
        Some((kind, subtype)) if is_token(kind) && is_token(subtype) => content_type,
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AssetProvider for CloudinaryClient {
    async fn submit(
        &self,
        public_id: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ProviderResult<()> {
        validate_public_id(public_id)?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
        ]);
        let size = data.len();

        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_or_default(content_type))?;

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("public_id", public_id.to_string())
            .text("signature", signature)
            .part("file", part);

        let start = std::time::Instant::now();
        let response = self
            .http_client
            .post(self.upload_endpoint())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let uploaded: UploadApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            public_id = %uploaded.public_id,
            version = ?uploaded.version,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary upload successful"
        );

        Ok(())
    }

    async fn lookup_canonical_url(&self, public_id: &str) -> ProviderResult<String> {
        validate_public_id(public_id)?;

        let response = self
            .http_client
            .get(self.resource_endpoint(public_id))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let asset: AssetApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        asset
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("missing secure_url".to_string()))
    }

    fn build_transformed_url(
        &self,
        public_id: &str,
        spec: &TransformSpec,
    ) -> ProviderResult<String> {
        validate_public_id(public_id)?;

        // The SDKs pin a version segment for identifiers inside folders.
        let version = if public_id.contains('/') { "v1/" } else { "" };

        Ok(format!(
            "{}/{}/image/upload/{}/{}{}",
            self.config.delivery_base_url, self.config.cloud_name, spec, version, public_id
        ))
    }
}
