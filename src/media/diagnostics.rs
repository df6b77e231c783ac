use crate::media::CameraError;

/// Operator-visible channel for failures the UI does not surface.
pub trait DiagnosticChannel {
    fn camera_failure(&mut self, error: &CameraError);
}

/// Writes diagnostics to the application log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticChannel for LogDiagnostics {
    fn camera_failure(&mut self, error: &CameraError) {
        log::error!("Error accessing webcam: {}", error);
    }
}
