//! Standalone checks for files picked in the upload form.
//!
//! Neither helper is called on the submission path; the prediction service
//! does its own validation. They are kept for hosts that want to check a file
//! before sending it.

use crate::models::UploadedFile;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// 16 MiB, matching the prediction service's request limit.
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

pub const INVALID_TYPE_MESSAGE: &str = "Please select a valid image file (JPEG, PNG, or GIF).";
pub const TOO_LARGE_MESSAGE: &str = "File size must be less than 16MB.";

/// Human-readable size using 1024-based units, rounded to two decimals with
/// trailing zeros dropped (`1536` -> `"1.5 KB"`). Sizes past the last unit
/// stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{} {}", value, SIZE_UNITS[unit])
}

/// Returns the message to show the user, or `None` when the file is an
/// accepted image type no larger than [`MAX_IMAGE_BYTES`].
pub fn validate_image_file(file: &UploadedFile) -> Option<&'static str> {
    if !ALLOWED_IMAGE_TYPES.contains(&file.mime_type.as_str()) {
        return Some(INVALID_TYPE_MESSAGE);
    }

    if file.size() > MAX_IMAGE_BYTES {
        return Some(TOO_LARGE_MESSAGE);
    }

    None
}
