use std::io::Cursor;

use serde::Deserialize;
use tiny_http::{Request, Response};

use viewwear::{run_try_on, validate_upload, NormalizeOptions, TryOnError, TryOnRequest};

use crate::state::SharedState;
use crate::util::data_url;

// ---------------------------------------------------------------------------
// POST /api/tryon
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TryOnBody {
    #[serde(default)]
    person_image: String,
    #[serde(default)]
    garments: Vec<String>,
}

/// Runs one try-on: decode the person photo from its data URL, normalize,
/// call the provider, and hand the result back as a data URL.
///
/// Status mapping: 400 for bad input, 502 for any provider-side outcome
/// (the message distinguishes a decline from a transport fault), 503 when
/// no provider is configured.
pub fn handle(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_err() {
        return crate::routes::json_error(400, "could not read request body");
    }

    let parsed: TryOnBody = match serde_json::from_str(&body) {
        Ok(b) => b,
        Err(_) => return crate::routes::json_error(400, "invalid JSON body"),
    };

    if parsed.person_image.is_empty() || parsed.garments.is_empty() {
        return crate::routes::json_error(400, "a person photo and at least one garment are required");
    }

    let (_, image_bytes) = match data_url::decode(&parsed.person_image) {
        Ok(decoded) => decoded,
        Err(_) => {
            return crate::routes::json_error(400, "personImage must be a base64 image data URL")
        }
    };

    // Same ceiling and sniffing as direct uploads.
    if let Err(e) = validate_upload(&image_bytes) {
        return crate::routes::json_error(400, &e.to_string());
    }

    let provider = match &state.provider {
        Some(p) => p,
        None => {
            return crate::routes::json_error(503, "the image-edit provider is not configured")
        }
    };

    let try_on = TryOnRequest {
        person_image: image_bytes,
        garments: parsed.garments,
    };

    match run_try_on(provider, &try_on, &NormalizeOptions::default()) {
        Ok(result) => crate::routes::json_response(
            200,
            serde_json::json!({
                "success": true,
                "resultImage": data_url::encode(&result.media_type, &result.bytes),
            }),
        ),
        Err(TryOnError::BadInput) => {
            crate::routes::json_error(400, &TryOnError::BadInput.to_string())
        }
        Err(TryOnError::Normalize(e)) => crate::routes::json_error(400, &e.to_string()),
        Err(TryOnError::Provider(e)) => {
            eprintln!("tryon: provider failure: {}", e);
            crate::routes::json_error(502, &e.to_string())
        }
    }
}
