//! Media source lifecycle
//!
//! A single display sink shows at most one source at a time: either a
//! locally selected video file (through a playable reference) or a live
//! camera stream. [`MediaSourceController`] owns the sink and mediates every
//! transition between the two.

mod controller;
mod diagnostics;
mod error;
mod frame;
mod sink;
mod source;
mod state;

pub use controller::{CameraOutcome, CameraRequest, MediaSourceController};
pub use diagnostics::{DiagnosticChannel, LogDiagnostics};
pub use error::CameraError;
pub use frame::VideoFrame;
pub use sink::{DisplaySink, SinkOptions};
pub use source::{
    CameraStream, CaptureConstraints, MediaTrack, PlayableRef, ReferenceStore, SelectedFile,
    TrackState,
};
pub use state::{ActiveSource, SourceKind};
