//! Camera capture module
//!
//! Opens the local camera through the platform backend (V4L2 on Linux,
//! AVFoundation on macOS, Media Foundation on Windows) and publishes the
//! most recent RGBA frame to the display.

mod camera;
mod traits;

pub use camera::NativeCamera;
pub use traits::CameraProvider;
