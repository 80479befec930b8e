//! Configuration module
//!
//! Configuration is read once at process start and passed explicitly to the
//! services that need it. Provider credentials are never re-read per request.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const MAX_UPLOAD_SIZE_MB: usize = 10;
/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
const CLOUDINARY_API_BASE_URL: &str = "https://api.cloudinary.com";
const CLOUDINARY_DELIVERY_BASE_URL: &str = "https://res.cloudinary.com";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub log_format: String,
}

/// Cloudinary account and endpoint settings
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
    pub delivery_base_url: String,
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("delivery_base_url", &self.delivery_base_url)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub cloudinary: CloudinaryConfig,
    pub uploads_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} must be set", key))
        };

        let server_port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => DEFAULT_PORT,
        };

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_upload_size_mb = match lookup("MAX_UPLOAD_SIZE_MB").filter(|v| !v.trim().is_empty()) {
            Some(size) => size.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a whole number of megabytes: {}", e)
            })?,
            None => MAX_UPLOAD_SIZE_MB,
        };

        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .filter(|bytes| bytes.checked_add(MULTIPART_OVERHEAD_BYTES).is_some())
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", max_upload_size_mb)
            })?;

        let base = BaseConfig {
            server_port,
            environment,
            max_upload_size_bytes,
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
        };

        let cloudinary = CloudinaryConfig {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            api_base_url: lookup("CLOUDINARY_API_BASE_URL")
                .unwrap_or_else(|| CLOUDINARY_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            delivery_base_url: lookup("CLOUDINARY_DELIVERY_BASE_URL")
                .unwrap_or_else(|| CLOUDINARY_DELIVERY_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let uploads_dir = lookup("UPLOADS_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR));

        Ok(Config {
            base,
            cloudinary,
            uploads_dir,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        if self
            .base
            .max_upload_size_bytes
            .checked_add(MULTIPART_OVERHEAD_BYTES)
            .is_none()
        {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"));
        }
        if self.cloudinary.cloud_name.contains('/') {
            return Err(anyhow::anyhow!(
                "CLOUDINARY_CLOUD_NAME must not contain '/'"
            ));
        }
        for (name, url) in [
            ("CLOUDINARY_API_BASE_URL", &self.cloudinary.api_base_url),
            (
                "CLOUDINARY_DELIVERY_BASE_URL",
                &self.cloudinary.delivery_base_url,
            ),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL", name));
            }
        }
        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.base.max_upload_size_bytes
    }

    /// Whole-request limit: the file plus multipart framing.
    ///
    /// Saturates instead of wrapping; `validate` rejects limits that would.
    pub fn request_body_limit(&self) -> usize {
        self.base
            .max_upload_size_bytes
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}
