//! Upload and asset models
//!
//! None of these are persisted: an `UploadedFile` lives for one request and a
//! `PublishedAsset` is only the set of strings the provider handed back.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Folder every published asset is stored under at the provider.
pub const ASSET_NAMESPACE: &str = "editor";

/// Fixed suffix of scratch file names.
const SCRATCH_SUFFIX: &str = "img";

/// Scratch base name for a request token: `<token>_img`.
///
/// The client's filename never takes part in the name.
pub fn scratch_base_name(token: &Uuid) -> String {
    format!("{}_{}", token.simple(), SCRATCH_SUFFIX)
}

/// Provider identifier for a scratch base name: `editor/<base_name>`.
pub fn asset_public_id(base_name: &str) -> String {
    format!("{}/{}", ASSET_NAMESPACE, base_name)
}

/// File extracted from the multipart `image` field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Base component of the client-supplied filename, for logging only
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(original_filename: Option<&str>, content_type: Option<&str>, data: Vec<u8>) -> Self {
        let original_filename = original_filename
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .unwrap_or("unknown")
            .to_string();

        Self {
            original_filename,
            content_type: content_type
                .unwrap_or("application/octet-stream")
                .to_string(),
            data,
        }
    }

    pub fn content_length(&self) -> usize {
        self.data.len()
    }
}

/// Crop mode of a delivery transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    Fill,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "fill",
        }
    }
}

/// Image transformation applied when building a delivery URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    pub crop: CropMode,
    pub height: u32,
    pub width: u32,
}

impl TransformSpec {
    /// The one transformation delivered to callers: fill-crop to 500x500.
    pub const DELIVERY: TransformSpec = TransformSpec {
        crop: CropMode::Fill,
        height: 500,
        width: 500,
    };
}

/// Renders the URL component, e.g. `c_fill,h_500,w_500`.
impl fmt::Display for TransformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c_{},h_{},w_{}",
            self.crop.as_str(),
            self.height,
            self.width
        )
    }
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAsset {
    pub public_id: String,
    /// Best-effort lookup result; `None` when the lookup failed
    pub canonical_url: Option<String>,
    pub delivery_url: String,
}

/// Response body of `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Transformed delivery URL
    pub filename: String,
    pub public_id: String,
}

impl From<PublishedAsset> for UploadResponse {
    fn from(asset: PublishedAsset) -> Self {
        Self {
            success: true,
            filename: asset.delivery_url,
            public_id: asset.public_id,
        }
    }
}
