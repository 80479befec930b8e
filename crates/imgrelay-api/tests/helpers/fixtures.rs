//! Test fixtures: minimal image blobs and multipart forms.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal JPEG: SOI, APP0/JFIF header, EOI.
pub fn create_minimal_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
    ]
}

/// Multipart form with the JPEG fixture under `image`.
pub fn image_form(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(create_minimal_jpeg())
            .file_name(filename)
            .mime_type("image/jpeg"),
    )
}
