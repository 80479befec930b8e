use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension, Json,
};
use imgrelay_core::{PublishError, UploadResponse};

use crate::error::HttpAppError;
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::utils::upload::extract_image_field;

/// Upload image handler
///
/// Accepts multipart field `image`, publishes it through the
/// [`UploadPublisher`](crate::services::publisher::UploadPublisher) and
/// returns the transformed delivery URL.
///
/// # Returns
/// `200 {"success": true, "filename": <delivery URL>, "public_id": "editor/<token>_img"}`
///
/// # Errors
/// - `400 {"error": "No image provided"}` - no readable `image` field
/// - `413 {"error": "Image too large"}` - body overran the size limit
/// - `500 {"error": ...}` - scratch storage or provider failure
#[tracing::instrument(
    skip(state, request_id, multipart),
    fields(request_id = %request_id.id, operation = "upload_image")
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request is not a readable multipart form");
        PublishError::MissingFile
    })?;

    let file = extract_image_field(multipart).await?;

    let asset = state
        .publisher
        .publish_upload(request_id.id, file)
        .await?;

    Ok(Json(UploadResponse::from(asset)))
}
