use std::time::Duration;

// camera
pub const CAMERA_WIDTH: u32 = 1280;
pub const CAMERA_HEIGHT: u32 = 720;
pub const CAMERA_FRAME_RATE: u32 = 30;
pub const DEFAULT_CAMERA_INDEX: u32 = 0;
/// Consecutive failed frames after which a capture is abandoned
pub const MAX_FRAME_FAILURES: u32 = 30;

// playback
pub const PAUSE_POLL: Duration = Duration::from_millis(10);
/// How often the display polls for a newer frame
pub const DISPLAY_REFRESH: Duration = Duration::from_millis(16);

/// Extensions offered by the "Upload Video" picker (the `video/*` family)
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "webm", "mkv", "avi", "mpg", "mpeg", "ogv", "wmv", "flv", "3gp",
];

// window
pub const WINDOW_WIDTH: f32 = 960f32;
pub const WINDOW_HEIGHT: f32 = 720f32;
pub const MIN_WINDOW_WIDTH: f32 = 480f32;
pub const MIN_WINDOW_HEIGHT: f32 = 360f32;
pub const MAX_VIDEO_WIDTH: f32 = 1280f32;
