//! Multipart helpers for upload handlers

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use imgrelay_core::{PublishError, UploadedFile};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Extract the `image` field from a multipart form.
///
/// A body cut off by the request size limit is reported as too large; any
/// other failure to read the form counts as the image being absent. Other
/// fields are ignored; if `image` appears more than once the first wins.
pub async fn extract_image_field(mut multipart: Multipart) -> Result<UploadedFile, PublishError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(PublishError::MissingFile),
            Err(e) => return Err(read_error(e, "Failed to read multipart body")),
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let data = field
            .bytes()
            .await
            .map_err(|e| read_error(e, "Failed to read image field"))?;

        return Ok(UploadedFile::new(
            filename.as_deref(),
            content_type.as_deref(),
            data.to_vec(),
        ));
    }
}

fn read_error(error: MultipartError, context: &str) -> PublishError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return PublishError::PayloadTooLarge(error.body_text());
    }
    tracing::debug!(error = %error, "{}", context);
    PublishError::MissingFile
}
