use thiserror::Error;

/// Failures of the flat-file garment store.
///
/// Note that an unreadable store surfaces as `Io` — it is never masked as an
/// empty catalog.  Individual unparsable lines are skipped at read time and
/// do not produce an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("garment store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize garment record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Upload validation failures.  All of these are user-correctable and are
/// reported before any bytes are written to disk.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("no file content was received")]
    Empty,

    #[error("file is {got} bytes, exceeding the {max} byte upload limit")]
    TooLarge { got: usize, max: usize },

    #[error("file is not a recognized image format")]
    NotAnImage,
}

/// Camera capture failures.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Permission denied or no usable device.
    #[error("could not access the camera: {0}")]
    Device(String),

    #[error("the video source produced no frame")]
    NoFrame,

    /// The requested action is not valid in the current capture state
    /// (e.g. `confirm` before anything was captured).
    #[error("capture action '{0}' is not valid in the current state")]
    InvalidAction(&'static str),
}

/// Image normalization failures.  A failed decode or encode is always
/// explicit; normalization never hands back a partially drawn image.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("could not decode source image: {0}")]
    Decode(image::ImageError),

    #[error("could not encode normalized image: {0}")]
    Encode(image::ImageError),
}

/// Failures from the external image-edit provider.
///
/// `Declined` and `NoImage` are content-level outcomes (the request reached
/// the provider), kept distinct from `Transport` so callers can tell a
/// retryable network problem from a non-retryable policy decision.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("the provider declined to generate an image: {0}")]
    Declined(String),

    #[error("the provider accepted the request but returned no image")]
    NoImage,

    #[error("could not reach the provider: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

/// Failures of a full try-on run.
#[derive(Error, Debug)]
pub enum TryOnError {
    #[error("a person photo and at least one garment are required")]
    BadInput,

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
