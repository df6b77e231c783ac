//! Traits for camera capture

use crate::media::{CameraError, CameraStream, CaptureConstraints};
use async_trait::async_trait;

/// The camera/permission subsystem.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Ask for a live stream matching `constraints`.
    ///
    /// Resolves once the device is open and streaming, or with the reason
    /// it could not be opened.
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<CameraStream, CameraError>;
}
