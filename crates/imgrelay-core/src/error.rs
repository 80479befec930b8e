//! Error types module
//!
//! Every failure of the upload-and-publish workflow is one `PublishError`
//! variant. The variants carry the internal detail for server-side logs; the
//! caller only ever sees the fixed client message of its category.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing form field
    Debug,
    /// Warning level - for client errors worth noticing, like oversize uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message, never containing internal details
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("No image provided")]
    MissingFile,

    #[error("Upload exceeds the request size limit: {0}")]
    PayloadTooLarge(String),

    #[error("Scratch directory unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to write scratch file: {0}")]
    WriteFailed(String),

    #[error("Provider upload failed: {0}")]
    UploadFailed(String),

    #[error("Transformed URL construction failed: {0}")]
    TransformFailed(String),
}

impl PublishError {
    /// Variant name for structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            PublishError::MissingFile => "MissingFile",
            PublishError::PayloadTooLarge(_) => "PayloadTooLarge",
            PublishError::StorageUnavailable(_) => "StorageUnavailable",
            PublishError::WriteFailed(_) => "WriteFailed",
            PublishError::UploadFailed(_) => "UploadFailed",
            PublishError::TransformFailed(_) => "TransformFailed",
        }
    }
}

impl ErrorMetadata for PublishError {
    fn http_status_code(&self) -> u16 {
        match self {
            PublishError::MissingFile => 400,
            PublishError::PayloadTooLarge(_) => 413,
            _ => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PublishError::MissingFile => "MISSING_FILE",
            PublishError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            PublishError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            PublishError::WriteFailed(_) => "WRITE_FAILED",
            PublishError::UploadFailed(_) => "UPLOAD_FAILED",
            PublishError::TransformFailed(_) => "TRANSFORM_FAILED",
        }
    }

    fn client_message(&self) -> String {
        match self {
            PublishError::MissingFile => "No image provided",
            PublishError::PayloadTooLarge(_) => "Image too large",
            PublishError::StorageUnavailable(_) => "Failed to create uploads directory",
            PublishError::WriteFailed(_) => "Failed to save image",
            // Both are provider-side failures and share one public message.
            PublishError::UploadFailed(_) | PublishError::TransformFailed(_) => {
                "Failed to upload image to Cloudinary"
            }
        }
        .to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            PublishError::MissingFile => LogLevel::Debug,
            PublishError::PayloadTooLarge(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_client_error() {
        let err = PublishError::MissingFile;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No image provided");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_payload_too_large_is_client_error() {
        let err = PublishError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.client_message(), "Image too large");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_client_messages_hide_details() {
        let cases = [
            (
                PublishError::StorageUnavailable("permission denied".into()),
                "Failed to create uploads directory",
            ),
            (
                PublishError::WriteFailed("disk full".into()),
                "Failed to save image",
            ),
            (
                PublishError::UploadFailed("401 invalid signature".into()),
                "Failed to upload image to Cloudinary",
            ),
            (
                PublishError::TransformFailed("empty identifier".into()),
                "Failed to upload image to Cloudinary",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.http_status_code(), 500);
            assert_eq!(err.client_message(), expected);
            assert_eq!(err.log_level(), LogLevel::Error);
        }
    }

    #[test]
    fn test_display_keeps_internal_detail() {
        let err = PublishError::UploadFailed("connection reset".into());
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.error_type(), "UploadFailed");
        assert_eq!(err.error_code(), "UPLOAD_FAILED");
    }
}
