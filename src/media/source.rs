//! File and camera sources

use crate::assets::{CAMERA_FRAME_RATE, CAMERA_HEIGHT, CAMERA_WIDTH};
use crate::media::VideoFrame;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// A file chosen by the user through the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SelectedFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Playable handle for a selected file, valid until revoked in the
/// [`ReferenceStore`] that created it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayableRef {
    id: u64,
    path: PathBuf,
}

impl PlayableRef {
    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("media://{}", self.id)
    }
}

impl fmt::Display for PlayableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url(), self.path.display())
    }
}

/// Bookkeeping of live playable references.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    next_id: u64,
    live: HashSet<u64>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, file: &SelectedFile) -> PlayableRef {
        self.next_id += 1;
        self.live.insert(self.next_id);
        let reference = PlayableRef {
            id: self.next_id,
            path: file.path().to_path_buf(),
        };
        log::debug!("Created playable reference {}", reference);
        reference
    }

    /// Returns `false` if the reference was already released.
    pub fn revoke(&mut self, reference: &PlayableRef) -> bool {
        let removed = self.live.remove(&reference.id);
        if removed {
            log::debug!("Released playable reference {}", reference.url());
        }
        removed
    }

    #[cfg(test)]
    pub fn is_live(&self, reference: &PlayableRef) -> bool {
        self.live.contains(&reference.id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// What the camera subsystem is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub video: bool,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        CaptureConstraints {
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
            frame_rate: CAMERA_FRAME_RATE,
            video: true,
            audio: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Live,
    Ended,
}

/// One track of a capture stream.
///
/// Stopping cancels the token the capture worker listens on. A cancelled
/// token cannot be reset, so an ended track never goes live again.
#[derive(Debug)]
pub struct MediaTrack {
    id: u64,
    label: String,
    stop: CancellationToken,
}

impl MediaTrack {
    pub fn video(label: impl Into<String>, stop: CancellationToken) -> Self {
        MediaTrack {
            id: NEXT_TRACK_ID.fetch_add(1, Ordering::SeqCst),
            label: label.into(),
            stop,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> TrackState {
        if self.stop.is_cancelled() {
            TrackState::Ended
        } else {
            TrackState::Live
        }
    }

    /// Returns `true` if the track was live.
    pub fn stop(&self) -> bool {
        let was_live = self.state() == TrackState::Live;
        self.stop.cancel();
        if was_live {
            log::debug!("Stopped video track {} ({})", self.id, self.label);
        }
        was_live
    }
}

/// Live capture stream; every track is stopped when the stream is dropped.
pub struct CameraStream {
    tracks: Vec<MediaTrack>,
    frames: watch::Receiver<Option<VideoFrame>>,
}

impl CameraStream {
    pub fn new(tracks: Vec<MediaTrack>, frames: watch::Receiver<Option<VideoFrame>>) -> Self {
        CameraStream { tracks, frames }
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// A new subscription to the latest captured frame.
    pub fn frames(&self) -> watch::Receiver<Option<VideoFrame>> {
        self.frames.clone()
    }

    #[cfg(test)]
    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(|t| t.state() == TrackState::Live)
    }

    /// Stop every track; returns how many were still live.
    pub fn stop(&mut self) -> usize {
        self.tracks.iter().filter(|track| track.stop()).count()
    }
}

impl fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraStream")
            .field("tracks", &self.tracks)
            .finish_non_exhaustive()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        let stopped = self.stop();
        if stopped > 0 {
            log::debug!("Dropped camera stream with {} live track(s)", stopped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_with(tokens: &[CancellationToken]) -> CameraStream {
        let (_tx, rx) = watch::channel(None);
        let tracks = tokens
            .iter()
            .map(|t| MediaTrack::video("test camera", t.clone()))
            .collect();
        CameraStream::new(tracks, rx)
    }

    #[test]
    fn test_reference_store_tracks_live_references() {
        let mut store = ReferenceStore::new();
        let file = SelectedFile::new("/videos/squat.mp4");

        let a = store.create(&file);
        let b = store.create(&file);
        assert_ne!(a.id(), b.id());
        assert_eq!(store.live_count(), 2);

        assert!(store.revoke(&a));
        assert!(!store.revoke(&a));
        assert!(!store.is_live(&a));
        assert!(store.is_live(&b));
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_selected_file_name() {
        assert_eq!(SelectedFile::new("/videos/desk.webm").name(), "desk.webm");
        assert_eq!(SelectedFile::new("/").name(), "");
    }

    #[test]
    fn test_default_constraints_request_hd_video_only() {
        let c = CaptureConstraints::default();
        assert_eq!((c.width, c.height), (1280, 720));
        assert!(c.video);
        assert!(!c.audio);
    }

    #[test]
    fn test_stopped_track_never_resumes() {
        let token = CancellationToken::new();
        let track = MediaTrack::video("cam", token.clone());
        assert_eq!(track.state(), TrackState::Live);

        assert!(track.stop());
        assert_eq!(track.state(), TrackState::Ended);
        assert!(!track.stop());
        assert!(token.is_cancelled());
        assert_eq!(track.state(), TrackState::Ended);
    }

    #[test]
    fn test_stream_stop_counts_live_tracks() {
        let tokens = [CancellationToken::new(), CancellationToken::new()];
        tokens[1].cancel();
        let mut stream = stream_with(&tokens);

        assert!(stream.is_live());
        assert_eq!(stream.stop(), 1);
        assert!(!stream.is_live());
        assert_eq!(stream.stop(), 0);
    }

    #[test]
    fn test_dropping_stream_stops_tracks() {
        let tokens = [CancellationToken::new()];
        drop(stream_with(&tokens));
        assert!(tokens[0].is_cancelled());
    }
}
