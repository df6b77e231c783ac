//! Video file decoding
//!
//! Demuxes and decodes a local video file with FFmpeg, converts frames to
//! RGBA and publishes them at their presentation time.

mod clock;
mod playback;

pub use clock::PlaybackClock;
pub use playback::{FilePlayback, PlaybackStatus};
