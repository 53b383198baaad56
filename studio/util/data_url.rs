/// Base64 data URL encoding and decoding (`data:image/png;base64,...`),
/// the shape the browser exchanges images in.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, BASE64.encode(bytes))
}

/// Splits a data URL into `(media_type, bytes)`.
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), String> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URL".to_owned())?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| "malformed data URL".to_owned())?;
    let media_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| "only base64 data URLs are supported".to_owned())?;

    let bytes = BASE64
        .decode(payload.as_bytes())
        .map_err(|e| e.to_string())?;

    let media_type = if media_type.is_empty() {
        "application/octet-stream".to_owned()
    } else {
        media_type.to_owned()
    };
    Ok((media_type, bytes))
}
