use std::fs;
use std::io::Cursor;
use std::path::Path;

use tiny_http::{Request, Response};

use viewwear::catalog::custom_id;
use viewwear::intake::{safe_filename, validate_upload};
use viewwear::{Category, Garment};

use crate::state::SharedState;
use crate::util::multipart::{extract_boundary, MultipartForm};

// ---------------------------------------------------------------------------
// POST /api/upload
// ---------------------------------------------------------------------------

/// Accepts a multipart image upload.
///
/// Fields: `file` (the image), `isGarment` ("true" for catalog entries),
/// and for garments `garmentName` + `garmentCategory`.  The file is
/// validated (size ceiling, image sniff) before anything touches disk, then
/// written under `public/garments/` or `public/uploads/`.  Garment uploads
/// with a name and a valid category are also appended to the store.
pub fn handle(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None => return crate::routes::json_error(400, "expected a multipart/form-data request"),
    };

    let mut body: Vec<u8> = Vec::new();
    if request.as_reader().read_to_end(&mut body).is_err() {
        return crate::routes::json_error(400, "could not read request body");
    }

    let form = MultipartForm::parse(&body, &boundary);

    let file = match form.file("file") {
        Some(f) if !f.data.is_empty() => f,
        _ => return crate::routes::json_error(400, "no file received"),
    };

    if let Err(e) = validate_upload(file.data) {
        return crate::routes::json_error(400, &e.to_string());
    }

    let is_garment = form.field("isGarment") == Some("true");
    let dir = if is_garment {
        "public/garments"
    } else {
        "public/uploads"
    };

    let filename = safe_filename(file.filename.as_deref().unwrap_or("upload"));
    let save = fs::create_dir_all(dir)
        .and_then(|_| fs::write(Path::new(dir).join(&filename), file.data));
    if let Err(e) = save {
        eprintln!("upload: could not save file: {}", e);
        return crate::routes::json_error(500, "could not save the uploaded file");
    }

    let url = if is_garment {
        format!("/garments/{}", filename)
    } else {
        format!("/uploads/{}", filename)
    };

    if is_garment {
        let name = form.field("garmentName").unwrap_or("").trim().to_owned();
        let category = form.field("garmentCategory").and_then(Category::parse);

        if let (false, Some(category)) = (name.is_empty(), category) {
            let garment = Garment {
                id: custom_id(),
                name,
                category,
                image: url.clone(),
                is_custom: true,
            };
            if let Err(e) = state.store.add(&garment) {
                eprintln!("upload: could not record garment: {}", e);
                return crate::routes::json_error(500, "could not record the garment in the catalog");
            }
            return crate::routes::json_response(
                200,
                serde_json::json!({ "success": true, "url": url, "garment": garment }),
            );
        }
    }

    crate::routes::json_response(200, serde_json::json!({ "success": true, "url": url }))
}
