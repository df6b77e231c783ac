use thiserror::Error;

/// Camera acquisition failure.
///
/// Every variant is reported on the diagnostic channel and leaves the
/// controller state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NoDevice,
    #[error("camera hardware error: {0}")]
    Hardware(String),
}
