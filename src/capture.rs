/// Camera capture state machine.
///
/// The capture flow — start the camera, take a still, retake or confirm —
/// is modeled as an explicit state container generic over a [`VideoSource`],
/// so the transitions are testable without any real device.
///
/// The on-screen live preview is mirrored for natural self-viewing, so the
/// captured still is mirrored too: the saved image matches what the user saw,
/// like a real mirror, instead of being left-right flipped relative to it.
///
/// Release contract: the video source is released on `confirm`, on `close`,
/// and on drop — every exit path, including error paths.
use image::RgbImage;

use crate::error::CaptureError;

/// A live video device.  Implementations own the underlying resource;
/// `release` must stop it and is safe to call more than once.
pub trait VideoSource {
    fn grab_frame(&mut self) -> Result<RgbImage, CaptureError>;
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Live preview is running.
    Streaming,
    /// A still has been taken; awaiting retake or confirm.
    Captured,
    /// The device could not be acquired or a frame grab failed.
    Failed,
    /// Terminal: confirmed or torn down. The source has been released.
    Closed,
}

pub struct CameraCapture<S: VideoSource> {
    source: Option<S>,
    still: Option<RgbImage>,
    state: CaptureState,
    error: Option<String>,
}

impl<S: VideoSource> CameraCapture<S> {
    /// Acquires the video source and starts streaming.  If acquisition fails
    /// (permission denied, device unavailable) the component lands in
    /// `Failed` with a user-presentable message instead of panicking.
    pub fn start(open: impl FnOnce() -> Result<S, CaptureError>) -> Self {
        match open() {
            Ok(source) => CameraCapture {
                source: Some(source),
                still: None,
                state: CaptureState::Streaming,
                error: None,
            },
            Err(e) => CameraCapture {
                source: None,
                still: None,
                state: CaptureState::Failed,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The failure message, when in `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The pending still, when in `Captured`.
    pub fn still(&self) -> Option<&RgbImage> {
        self.still.as_ref()
    }

    /// Takes a still from the current frame, mirrored horizontally.
    pub fn capture(&mut self) -> Result<(), CaptureError> {
        if self.state != CaptureState::Streaming {
            return Err(CaptureError::InvalidAction("capture"));
        }
        let source = self.source.as_mut().ok_or(CaptureError::NoFrame)?;
        match source.grab_frame() {
            Ok(frame) => {
                self.still = Some(image::imageops::flip_horizontal(&frame));
                self.state = CaptureState::Captured;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = CaptureState::Failed;
                self.release_source();
                Err(e)
            }
        }
    }

    /// Discards the pending still and returns to the live preview.
    pub fn retake(&mut self) -> Result<(), CaptureError> {
        if self.state != CaptureState::Captured {
            return Err(CaptureError::InvalidAction("retake"));
        }
        self.still = None;
        self.state = CaptureState::Streaming;
        Ok(())
    }

    /// Yields the confirmed still and releases the video source.
    pub fn confirm(&mut self) -> Result<RgbImage, CaptureError> {
        if self.state != CaptureState::Captured {
            return Err(CaptureError::InvalidAction("confirm"));
        }
        let still = self.still.take().ok_or(CaptureError::InvalidAction("confirm"))?;
        self.release_source();
        self.state = CaptureState::Closed;
        Ok(still)
    }

    /// Tears the component down from any state, releasing the source.
    pub fn close(&mut self) {
        self.release_source();
        self.still = None;
        self.state = CaptureState::Closed;
    }

    fn release_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
        }
    }
}

impl<S: VideoSource> Drop for CameraCapture<S> {
    fn drop(&mut self) {
        self.release_source();
    }
}
