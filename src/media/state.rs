//! Active-source state

use crate::media::{CameraStream, PlayableRef};

/// Which kind of source is attached to the display sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Nothing attached
    Idle,
    /// A playable reference to a local file
    File,
    /// A live camera stream
    Camera,
}

impl SourceKind {
    /// Check if this state transition is valid
    pub fn can_transition_to(&self, target: &SourceKind) -> bool {
        use SourceKind::*;

        match (self, target) {
            (Idle, File) | (Idle, Camera) => true,

            // A new selection replaces the current file
            (File, File) => true,
            (File, Camera) => true,

            // A newer stream replaces the current one
            (Camera, Camera) => true,
            (Camera, File) => true,
            (Camera, Idle) => true,

            (Idle, Idle) => true,

            // File playback persists until replaced
            (File, Idle) => false,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SourceKind::Idle => "Idle",
            SourceKind::File => "FileAttached",
            SourceKind::Camera => "CameraAttached",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The single slot holding the attached source.
///
/// Each variant owns its resource, so a file and a camera can never be
/// attached together.
#[derive(Debug, Default)]
pub enum ActiveSource {
    #[default]
    Idle,
    FileAttached(PlayableRef),
    CameraAttached(CameraStream),
}

impl ActiveSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ActiveSource::Idle => SourceKind::Idle,
            ActiveSource::FileAttached(_) => SourceKind::File,
            ActiveSource::CameraAttached(_) => SourceKind::Camera,
        }
    }

    pub fn is_camera(&self) -> bool {
        matches!(self, ActiveSource::CameraAttached(_))
    }

    pub fn reference(&self) -> Option<&PlayableRef> {
        match self {
            ActiveSource::FileAttached(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn stream(&self) -> Option<&CameraStream> {
        match self {
            ActiveSource::CameraAttached(stream) => Some(stream),
            _ => None,
        }
    }
}
