use crate::media::{CameraStream, PlayableRef};

/// Rendering flags of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkOptions {
    /// Show inline playback controls (pause/resume) for file playback.
    pub controls: bool,
    /// Start file playback as soon as it is attached. Without it the file
    /// waits on its first frame for the inline control.
    pub autoplay: bool,
}

impl Default for SinkOptions {
    fn default() -> Self {
        SinkOptions {
            controls: true,
            autoplay: true,
        }
    }
}

/// The video surface a [`MediaSourceController`](crate::media::MediaSourceController)
/// attaches sources to.
///
/// Attaching replaces whatever was attached before; the sink never holds a
/// file and a live stream at the same time.
pub trait DisplaySink {
    /// Attach a file-backed playable reference.
    fn attach_reference(&mut self, reference: &PlayableRef);

    /// Attach a live capture stream.
    fn attach_stream(&mut self, stream: &CameraStream);

    /// Drop both the live-stream and the playable-reference attachment.
    fn clear(&mut self);

    /// Begin (or resume) rendering the current attachment, as far as the
    /// sink's autoplay setting allows.
    fn play(&mut self);
}
