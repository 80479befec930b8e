//! imgrelay Core Library
//!
//! This crate provides the types shared by every imgrelay crate: configuration,
//! the publish error taxonomy, and the upload/asset models.

pub mod config;
pub mod error;
pub mod models;

pub use config::{BaseConfig, CloudinaryConfig, Config};
pub use error::{ErrorMetadata, LogLevel, PublishError};
pub use models::{
    asset_public_id, scratch_base_name, CropMode, PublishedAsset, TransformSpec, UploadResponse,
    UploadedFile, ASSET_NAMESPACE,
};
