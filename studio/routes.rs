use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn json_response(status: u16, body: serde_json::Value) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.to_string().into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

/// The uniform error shape every failed API call resolves to.
pub fn json_error(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    json_response(status, serde_json::json!({ "success": false, "error": message }))
}

pub fn file_response(bytes: Vec<u8>, content_type: &[u8]) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", content_type).unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains
/// ownership and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();

    let (path, query) = if let Some(pos) = url.find('?') {
        (url[..pos].to_owned(), url[pos + 1..].to_owned())
    } else {
        (url.clone(), String::new())
    };

    // Static image assets — dynamic path segment.
    if method == Method::Get && (path.starts_with("/garments/") || path.starts_with("/uploads/")) {
        let resp = handlers::assets::handle(&path);
        let _ = request.respond(resp);
        return;
    }

    // Garment delete — dynamic path segment.
    if method == Method::Post && path.starts_with("/api/garments/") && path.ends_with("/delete") {
        let id = path
            .strip_prefix("/api/garments/")
            .and_then(|s| s.strip_suffix("/delete"))
            .unwrap_or("")
            .to_owned();
        let resp = handlers::catalog::handle_delete(&id, state);
        let _ = request.respond(resp);
        return;
    }

    let response = match (method, path.as_str()) {
        // ── Page ─────────────────────────────────────────────────────────
        (Method::Get, "/") => handlers::page::handle_get(state),

        // ── Catalog ──────────────────────────────────────────────────────
        (Method::Get, "/api/garments") => handlers::catalog::handle_list(&query, state),

        // ── Upload ───────────────────────────────────────────────────────
        (Method::Post, "/api/upload") => handlers::upload::handle(&mut request, state),

        // ── Try-on ───────────────────────────────────────────────────────
        (Method::Post, "/api/tryon") => handlers::tryon::handle(&mut request, state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}
