pub mod capture;
pub mod catalog;
pub mod error;
pub mod intake;
pub mod normalize;
pub mod session;
pub mod tryon;

// Convenience re-exports
pub use capture::{CameraCapture, CaptureState, VideoSource};
pub use catalog::{custom_id, Category, Garment, GarmentStore};
pub use error::{CaptureError, IntakeError, NormalizeError, ProviderError, StoreError, TryOnError};
pub use intake::{validate_upload, MAX_UPLOAD_BYTES};
pub use normalize::{normalize, NormalizeOptions, NormalizedImage};
pub use session::TryOnSession;
pub use tryon::{
    build_instruction, run_try_on, HttpImageEditProvider, ImageEditProvider, TryOnRequest,
    TryOnResult,
};
