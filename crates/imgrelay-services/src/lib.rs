//! imgrelay Services Layer
//!
//! Remote asset provider integration. The API crate only sees the
//! [`AssetProvider`] capability trait; [`CloudinaryClient`] is the production
//! implementation.

pub mod provider;
pub mod services;

pub use provider::{AssetProvider, ProviderError, ProviderResult};
pub use services::cloudinary::CloudinaryClient;
