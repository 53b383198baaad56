/// Try-on orchestration: build the edit instruction from the selected
/// garments, send the normalized person photo to the external image-edit
/// provider, and hand back the decoded result.
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::{ProviderError, TryOnError};
use crate::normalize::{normalize, NormalizeOptions};

/// One in-flight try-on request.  Transient — never persisted.
#[derive(Debug, Clone)]
pub struct TryOnRequest {
    /// Encoded person photo (any supported image format).
    pub person_image: Vec<u8>,
    /// Selected garment names, at most one per category, in category order.
    pub garments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TryOnResult {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// An image returned by the provider, tagged with its media type.
#[derive(Debug, Clone)]
pub struct ProviderImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// The external image-edit collaborator: one source image plus one text
/// instruction in, zero or one image out.
pub trait ImageEditProvider {
    fn edit_image(&self, image: &[u8], instruction: &str) -> Result<ProviderImage, ProviderError>;
}

/// Builds the edit instruction from the ordered garment names.
///
/// Deterministic: the same ordered list always yields byte-identical text.
pub fn build_instruction(garments: &[String]) -> String {
    let listed = garments
        .iter()
        .map(|g| format!("- {}", g))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Generate a realistic photo of the person wearing the following garments: {}. \
         Neutral background, natural lighting, realistic human proportions, no text.",
        listed
    )
}

/// Runs one full try-on: validate, normalize the person photo, build the
/// instruction, call the provider.
pub fn run_try_on(
    provider: &dyn ImageEditProvider,
    request: &TryOnRequest,
    opts: &NormalizeOptions,
) -> Result<TryOnResult, TryOnError> {
    if request.person_image.is_empty() || request.garments.is_empty() {
        return Err(TryOnError::BadInput);
    }

    let normalized = normalize(&request.person_image, opts)?;
    let instruction = build_instruction(&request.garments);
    let result = provider.edit_image(&normalized.bytes, &instruction)?;

    Ok(TryOnResult {
        bytes: result.bytes,
        media_type: result.media_type,
    })
}

// ---------------------------------------------------------------------------
// HTTP provider adapter
// ---------------------------------------------------------------------------

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Talks to the hosted image-edit endpoint over JSON: the image goes out
/// base64-encoded alongside the instruction, and the result comes back the
/// same way.
///
/// One retry, and only after a transport error — a decline or an empty
/// response is final and is never retried.
pub struct HttpImageEditProvider {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
    model: String,
}

#[derive(Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "mediaType", default)]
    media_type: Option<String>,
}

impl HttpImageEditProvider {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(HttpImageEditProvider {
            client,
            url: url.into(),
            token: token.into(),
            model: model.into(),
        })
    }

    fn call_once(&self, image: &[u8], instruction: &str) -> Result<ProviderImage, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": instruction,
            "image": BASE64.encode(image),
            "guidance_scale": 7.5,
            "num_inference_steps": 50,
        });

        let mut req = self.client.post(&self.url).json(&body);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        let resp = req
            .send()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            // 4xx carries the provider's own refusal (policy filter, bad
            // prompt); everything else is an upstream fault.
            if status.is_client_error() {
                return Err(ProviderError::Declined(extract_error(&text)));
            }
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: truncate(&text, 300),
            });
        }

        let parsed: ProviderResponse =
            serde_json::from_str(&text).map_err(|_| ProviderError::NoImage)?;
        if let Some(reason) = parsed.error {
            return Err(ProviderError::Declined(reason));
        }
        let encoded = match parsed.image {
            Some(s) if !s.is_empty() => s,
            // Accepted but empty-handed: a first-class failure mode, not a
            // transport error.
            _ => return Err(ProviderError::NoImage),
        };
        let bytes = BASE64
            .decode(encoded.as_bytes())
            .map_err(|_| ProviderError::NoImage)?;

        Ok(ProviderImage {
            bytes,
            media_type: parsed.media_type.unwrap_or_else(|| "image/png".to_owned()),
        })
    }
}

impl ImageEditProvider for HttpImageEditProvider {
    fn edit_image(&self, image: &[u8], instruction: &str) -> Result<ProviderImage, ProviderError> {
        match self.call_once(image, instruction) {
            Err(ProviderError::Transport(first)) => {
                eprintln!("provider: transport error, retrying once: {}", first);
                self.call_once(image, instruction)
            }
            other => other,
        }
    }
}

fn extract_error(body: &str) -> String {
    let parsed: Option<ProviderResponse> = serde_json::from_str(body).ok();
    match parsed.and_then(|p| p.error) {
        Some(reason) if !reason.is_empty() => reason,
        _ => truncate(body, 300),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_owned()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
