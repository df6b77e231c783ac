use crate::gui::common::Handoff;
use crate::media::{CameraError, CameraRequest, CameraStream};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Open the video file picker
    UploadVideo,
    /// The picker was closed, with the chosen file if any
    FileChosen(Option<PathBuf>),
    /// Request the camera
    StartWebcam,
    /// Camera acquisition finished
    WebcamAcquired(CameraRequest, Handoff<Result<CameraStream, CameraError>>),
    /// Stop the camera
    StopWebcam,
    /// Inline pause/resume control of file playback
    TogglePause,
    /// Display refresh tick
    FrameTick,
    /// Quit the app
    ExitApp,
}
