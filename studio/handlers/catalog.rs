use std::io::Cursor;
use tiny_http::Response;

use viewwear::Category;

use crate::state::SharedState;
use crate::util::form::{parse_query, query_get};

// ---------------------------------------------------------------------------
// GET /api/garments  and  GET /api/garments?category=NAME
// ---------------------------------------------------------------------------

/// Returns the full catalog in insertion order, optionally filtered to one
/// category.  A store failure is reported as such — never as an empty list.
pub fn handle_list(query: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let pairs = parse_query(query);

    let garments = match query_get(&pairs, "category") {
        Some(raw) => match Category::parse(raw) {
            Some(category) => state.store.filter_by_category(category),
            None => {
                return crate::routes::json_error(
                    400,
                    &format!("unknown category '{}'", raw),
                );
            }
        },
        None => state.store.list(),
    };

    match garments {
        Ok(list) => crate::routes::json_response(
            200,
            serde_json::json!({ "success": true, "garments": list }),
        ),
        Err(e) => {
            eprintln!("catalog: could not read garments: {}", e);
            crate::routes::json_error(500, "the garment catalog is unavailable")
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/garments/{id}/delete
// ---------------------------------------------------------------------------

pub fn handle_delete(id: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    if id.is_empty() {
        return crate::routes::json_error(400, "missing garment id");
    }

    match state.store.delete_by_id(id) {
        Ok(true) => crate::routes::json_response(200, serde_json::json!({ "success": true })),
        Ok(false) => crate::routes::json_error(404, &format!("no garment with id '{}'", id)),
        Err(e) => {
            eprintln!("catalog: could not delete '{}': {}", id, e);
            crate::routes::json_error(500, "the garment catalog is unavailable")
        }
    }
}
