use crate::assets::MAX_VIDEO_WIDTH;
use crate::decoder::{FilePlayback, PlaybackStatus};
use crate::gui::common::messages::AppEvent;
use crate::gui::components::buttons::{ActionButton, ButtonKind, Dimensions};
use crate::gui::widget::{Column, Container, Element, IcedParentExt, Row, Text};
use crate::media::{CameraStream, DisplaySink, PlayableRef, SinkOptions, VideoFrame};
use iced::widget::image::{self, Handle};
use iced::{ContentFit, Length, alignment};
use tokio::sync::watch;

/// What the surface is currently bound to.
enum Attachment {
    None,
    Reference { url: String, playback: FilePlayback },
    Live { label: String },
}

/// The display sink: renders the latest frame of whatever is attached.
pub struct Video {
    options: SinkOptions,
    attachment: Attachment,
    frames: Option<watch::Receiver<Option<VideoFrame>>>,
    handle: Option<Handle>,
}

impl Video {
    pub fn new(options: SinkOptions) -> Self {
        Video {
            options,
            attachment: Attachment::None,
            frames: None,
            handle: None,
        }
    }

    pub fn has_attachment(&self) -> bool {
        !matches!(self.attachment, Attachment::None)
    }

    /// Pull the newest frame, if one arrived since the last refresh.
    pub fn refresh(&mut self) -> bool {
        let Some(frames) = self.frames.as_mut() else {
            return false;
        };
        if !frames.has_changed().unwrap_or(false) {
            return false;
        }

        let frame = frames.borrow_and_update().clone();
        match frame {
            Some(frame) if !frame.is_empty() => {
                self.handle = Some(Handle::from_rgba(frame.width, frame.height, frame.data));
                true
            }
            _ => false,
        }
    }

    pub fn is_paused(&self) -> bool {
        match &self.attachment {
            Attachment::Reference { playback, .. } => playback.is_paused(),
            _ => false,
        }
    }

    /// Inline control: pause or resume file playback. Live streams ignore it.
    pub fn toggle_pause(&mut self) {
        if let Attachment::Reference { playback, url } = &self.attachment {
            let paused = !playback.is_paused();
            log::debug!("{} {}", if paused { "Pausing" } else { "Resuming" }, url);
            playback.set_paused(paused);
        }
    }

    pub fn playback_status(&self) -> Option<PlaybackStatus> {
        match &self.attachment {
            Attachment::Reference { playback, .. } => Some(playback.status()),
            _ => None,
        }
    }

    fn caption(&self) -> Option<String> {
        match &self.attachment {
            Attachment::None => None,
            Attachment::Live { label } => Some(format!("Live: {}", label)),
            Attachment::Reference { .. } => match self.playback_status()? {
                PlaybackStatus::Failed(message) => Some(format!("Cannot play this file: {}", message)),
                PlaybackStatus::Ended => Some(String::from("Playback ended")),
                PlaybackStatus::Opening | PlaybackStatus::Playing => None,
            },
        }
    }

    fn controls(&self) -> Row<'_, AppEvent> {
        let label = if self.is_paused() { "Play" } else { "Pause" };
        Row::new().spacing(8).push(
            ActionButton::new(label)
                .kind(ButtonKind::Secondary)
                .dim(Dimensions::Small)
                .build(AppEvent::TogglePause),
        )
    }

    pub fn view(&self) -> Element<'_, AppEvent> {
        let surface: Element<'_, AppEvent> = match &self.handle {
            Some(handle) => image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .into(),
            None => Container::new(Text::new(if self.has_attachment() {
                "Loading…"
            } else {
                "No video selected"
            }))
            .width(Length::Fill)
            .height(360)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(iced::widget::container::dark)
            .into(),
        };

        let show_controls =
            self.options.controls && matches!(self.attachment, Attachment::Reference { .. });
        let caption = self.caption();

        Column::new()
            .spacing(8)
            .max_width(MAX_VIDEO_WIDTH)
            .push(surface)
            .push_if(show_controls, || self.controls())
            .push_if(caption.is_some(), || Text::new(caption.unwrap_or_default()).size(14))
            .into()
    }
}

impl DisplaySink for Video {
    fn attach_reference(&mut self, reference: &PlayableRef) {
        let playback = FilePlayback::start(reference.path(), !self.options.autoplay);
        self.frames = Some(playback.frames());
        self.handle = None;
        self.attachment = Attachment::Reference {
            url: reference.url(),
            playback,
        };
    }

    fn attach_stream(&mut self, stream: &CameraStream) {
        let label = stream
            .tracks()
            .first()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| String::from("camera"));
        self.frames = Some(stream.frames());
        self.handle = None;
        self.attachment = Attachment::Live { label };
    }

    fn clear(&mut self) {
        self.attachment = Attachment::None;
        self.frames = None;
        self.handle = None;
    }

    /// Without autoplay a file stays on its first frame until the inline
    /// control resumes it. Live streams always render.
    fn play(&mut self) {
        if !self.options.autoplay {
            return;
        }
        if let Attachment::Reference { playback, .. } = &self.attachment {
            playback.set_paused(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaTrack, ReferenceStore, SelectedFile};
    use tokio_util::sync::CancellationToken;

    fn live_stream() -> (CameraStream, watch::Sender<Option<VideoFrame>>) {
        let (tx, rx) = watch::channel(None);
        let track = MediaTrack::video("Test Cam", CancellationToken::new());
        (CameraStream::new(vec![track], rx), tx)
    }

    #[test]
    fn test_live_frames_are_picked_up_on_refresh() {
        let mut video = Video::new(SinkOptions::default());
        let (stream, tx) = live_stream();
        video.attach_stream(&stream);
        video.play();

        assert!(!video.refresh());
        tx.send_replace(Some(VideoFrame::new(2, 1, vec![255u8; 8])));
        assert!(video.refresh());
        assert!(video.handle.is_some());
        assert!(!video.refresh());
        assert_eq!(video.caption().as_deref(), Some("Live: Test Cam"));
    }

    #[test]
    fn test_empty_frames_are_ignored() {
        let mut video = Video::new(SinkOptions::default());
        let (stream, tx) = live_stream();
        video.attach_stream(&stream);

        tx.send_replace(Some(VideoFrame::new(0, 0, Vec::new())));
        assert!(!video.refresh());
        assert!(video.handle.is_none());
    }

    #[test]
    fn test_clear_drops_attachment() {
        let mut video = Video::new(SinkOptions::default());
        let (stream, tx) = live_stream();
        video.attach_stream(&stream);
        tx.send_replace(Some(VideoFrame::new(1, 1, vec![0u8; 4])));
        video.refresh();

        video.clear();

        assert!(!video.has_attachment());
        assert!(video.handle.is_none());
        assert!(!video.refresh());
        assert_eq!(video.caption(), None);
    }

    #[test]
    fn test_reference_replaces_live_stream() {
        let mut video = Video::new(SinkOptions::default());
        let (stream, _tx) = live_stream();
        video.attach_stream(&stream);

        let mut store = ReferenceStore::new();
        let reference = store.create(&SelectedFile::new("/nonexistent/clip.mp4"));
        video.attach_reference(&reference);

        assert!(matches!(video.attachment, Attachment::Reference { .. }));
        assert!(video.playback_status().is_some());
    }

    #[test]
    fn test_without_autoplay_file_waits_for_inline_control() {
        let mut video = Video::new(SinkOptions {
            controls: true,
            autoplay: false,
        });
        let mut store = ReferenceStore::new();
        let reference = store.create(&SelectedFile::new("/nonexistent/clip.mp4"));

        video.attach_reference(&reference);
        assert!(video.is_paused());

        video.play();
        assert!(video.is_paused());

        video.toggle_pause();
        assert!(!video.is_paused());
        video.toggle_pause();
        assert!(video.is_paused());
    }

    #[test]
    fn test_autoplay_resumes_on_play() {
        let mut video = Video::new(SinkOptions::default());
        let mut store = ReferenceStore::new();
        let reference = store.create(&SelectedFile::new("/nonexistent/clip.mp4"));

        video.attach_reference(&reference);
        video.toggle_pause();
        assert!(video.is_paused());

        video.play();
        assert!(!video.is_paused());
    }

    #[test]
    fn test_pause_is_ignored_for_live_streams() {
        let mut video = Video::new(SinkOptions::default());
        let (stream, _tx) = live_stream();
        video.attach_stream(&stream);

        video.toggle_pause();
        assert!(!video.is_paused());
        assert_eq!(video.playback_status(), None);
    }
}
