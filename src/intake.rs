/// Upload intake checks.
///
/// Every image entering the system — file picker, drag-and-drop, or camera
/// still — passes through here before it is stored or forwarded.  Validation
/// is cheap and happens before any decode attempt.
use image::ImageFormat;

use crate::catalog::unix_millis;
use crate::error::IntakeError;

/// Upload size ceiling.  A file of exactly this size is accepted; one byte
/// over is rejected.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Validates an uploaded payload: size ceiling first, then content sniffing.
/// Returns the detected image format on success.
pub fn validate_upload(bytes: &[u8]) -> Result<ImageFormat, IntakeError> {
    if bytes.is_empty() {
        return Err(IntakeError::Empty);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(IntakeError::TooLarge {
            got: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    image::guess_format(bytes).map_err(|_| IntakeError::NotAnImage)
}

/// Drag-and-drop gate: only `image/*` media types are taken; anything else
/// is silently ignored rather than reported.
pub fn accepts_drop(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Builds a storage filename for an upload: millisecond timestamp prefix,
/// spaces replaced with underscores, path separators and parent-dir
/// references stripped so the name cannot escape the upload directory.
pub fn safe_filename(original: &str) -> String {
    let cleaned: String = original
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    let cleaned = cleaned.replace("..", "_").replace(' ', "_");
    let cleaned = if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned
    };
    format!("{}_{}", unix_millis(), cleaned)
}
