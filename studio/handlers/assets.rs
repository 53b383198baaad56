use std::io::Cursor;
use tiny_http::Response;

// ---------------------------------------------------------------------------
// GET /garments/{file}  and  GET /uploads/{file}
// ---------------------------------------------------------------------------

/// Serves stored image assets from `public/`.
pub fn handle(path: &str) -> Response<Cursor<Vec<u8>>> {
    let rel = path.trim_start_matches('/');

    // Exactly one path segment under public/, no traversal.
    if rel.contains("..") || rel.matches('/').count() != 1 || rel.ends_with('/') {
        return crate::routes::not_found();
    }

    let full = format!("public/{}", rel);
    match std::fs::read(&full) {
        Ok(bytes) => crate::routes::file_response(bytes, content_type_for(&full)),
        Err(_) => crate::routes::not_found(),
    }
}

fn content_type_for(path: &str) -> &'static [u8] {
    match path.rsplit('.').next().map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => b"image/png",
        Some("jpg") | Some("jpeg") => b"image/jpeg",
        Some("gif") => b"image/gif",
        Some("bmp") => b"image/bmp",
        Some("webp") => b"image/webp",
        _ => b"application/octet-stream",
    }
}
