use crate::assets::PAUSE_POLL;
use crate::decoder::PlaybackClock;
use crate::media::VideoFrame;
use ac_ffmpeg::codec::Decoder;
use ac_ffmpeg::codec::video::frame::get_pixel_format;
use ac_ffmpeg::codec::video::{VideoDecoder, VideoFrame as DecodedFrame, VideoFrameScaler};
use ac_ffmpeg::format::demuxer::Demuxer;
use ac_ffmpeg::format::io::IO;
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Where a file playback currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Opening,
    Playing,
    Ended,
    /// The file could not be opened or decoded.
    Failed(String),
}

/// A file being decoded on a background thread.
///
/// Dropping the playback stops the worker.
#[derive(Debug)]
pub struct FilePlayback {
    cancel: CancellationToken,
    paused: Arc<AtomicBool>,
    frames: watch::Receiver<Option<VideoFrame>>,
    status: watch::Receiver<PlaybackStatus>,
}

impl FilePlayback {
    /// Start decoding `path`. With `paused` set, the first frame is held
    /// until [`FilePlayback::set_paused`] releases it.
    pub fn start(path: &Path, paused: bool) -> Self {
        let cancel = CancellationToken::new();
        let paused = Arc::new(AtomicBool::new(paused));
        let (frame_tx, frames) = watch::channel(None);
        let (status_tx, status) = watch::channel(PlaybackStatus::Opening);

        let worker = Worker {
            path: path.to_path_buf(),
            frames: frame_tx,
            status: status_tx,
            paused: Arc::clone(&paused),
            cancel: cancel.clone(),
        };

        if let Err(e) = thread::Builder::new()
            .name("file-playback".to_string())
            .spawn(move || worker.run())
        {
            log::error!("Failed to spawn playback thread: {}", e);
            cancel.cancel();
        }

        FilePlayback {
            cancel,
            paused,
            frames,
            status,
        }
    }

    pub fn frames(&self) -> watch::Receiver<Option<VideoFrame>> {
        self.frames.clone()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status.borrow().clone()
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for FilePlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    path: PathBuf,
    frames: watch::Sender<Option<VideoFrame>>,
    status: watch::Sender<PlaybackStatus>,
    paused: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl Worker {
    fn run(self) {
        log::info!("Playback of {} started", self.path.display());
        match self.decode() {
            Ok(()) if self.cancel.is_cancelled() => {
                log::debug!("Playback of {} stopped", self.path.display());
            }
            Ok(()) => {
                log::info!("Playback of {} ended", self.path.display());
                self.status.send_replace(PlaybackStatus::Ended);
            }
            Err(e) => {
                log::warn!("Playback of {} failed: {:#}", self.path.display(), e);
                self.status.send_replace(PlaybackStatus::Failed(e.to_string()));
            }
        }
    }

    fn decode(&self) -> Result<()> {
        let input = File::open(&self.path)
            .with_context(|| format!("unable to open {}", self.path.display()))?;
        let io = IO::from_seekable_read_stream(input);

        let mut demuxer = Demuxer::builder()
            .build(io)?
            .find_stream_info(None)
            .map_err(|(_, err)| err)?;

        let (stream_index, mut decoder) = {
            let (index, stream) = demuxer
                .streams()
                .iter()
                .enumerate()
                .find(|(_, stream)| stream.codec_parameters().is_video_codec())
                .ok_or_else(|| anyhow!("no video stream"))?;
            (index, VideoDecoder::from_stream(stream)?.build()?)
        };

        let mut output = Output::default();

        while let Some(packet) = demuxer.take()? {
            if self.cancel.is_cancelled() {
                return Ok(());
            }
            if packet.stream_index() != stream_index {
                continue;
            }

            decoder.push(packet)?;
            while let Some(frame) = decoder.take()? {
                if !self.present(&frame, &mut output)? {
                    return Ok(());
                }
            }
        }

        decoder.flush()?;
        while let Some(frame) = decoder.take()? {
            if !self.present(&frame, &mut output)? {
                return Ok(());
            }
        }

        Ok(())
    }

    /// Wait for the frame's presentation time and publish it.
    /// Returns `false` once playback has been stopped.
    fn present(&self, frame: &DecodedFrame, output: &mut Output) -> Result<bool> {
        while self.paused.load(Ordering::Acquire) {
            output.clock.pause(Instant::now());
            if !self.sleep(PAUSE_POLL) {
                return Ok(false);
            }
        }
        output.clock.resume(Instant::now());

        let delay = output.clock.delay_for(frame.pts().as_micros(), Instant::now());
        if !self.sleep(delay) {
            return Ok(false);
        }

        let rgba = output.convert(frame)?;
        self.frames.send_replace(Some(rgba));
        if *self.status.borrow() == PlaybackStatus::Opening {
            self.status.send_replace(PlaybackStatus::Playing);
        }
        Ok(true)
    }

    /// Sleep in short slices so a stop request is noticed promptly.
    fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.cancel.is_cancelled() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return true;
            }
            thread::sleep(remaining.min(PAUSE_POLL));
        }
    }
}

/// Pixel conversion state, rebuilt when the frame size changes.
#[derive(Default)]
struct Output {
    clock: PlaybackClock,
    scaler: Option<(VideoFrameScaler, usize, usize)>,
}

impl Output {
    fn convert(&mut self, frame: &DecodedFrame) -> Result<VideoFrame> {
        let (width, height) = (frame.width(), frame.height());

        let stale = !matches!(&self.scaler, Some((_, w, h)) if (*w, *h) == (width, height));
        if stale {
            let scaler = VideoFrameScaler::builder()
                .source_pixel_format(frame.pixel_format())
                .source_width(width)
                .source_height(height)
                .target_pixel_format(get_pixel_format("rgba"))
                .target_width(width)
                .target_height(height)
                .build()?;
            self.scaler = Some((scaler, width, height));
        }

        let Some((scaler, _, _)) = self.scaler.as_mut() else {
            return Err(anyhow!("no scaler for {}x{}", width, height));
        };
        let scaled = scaler.scale(frame)?;
        let planes = scaled.planes();
        let plane = &planes[0];

        Ok(VideoFrame::from_padded_rgba(
            plane.data(),
            plane.line_size(),
            width as u32,
            height as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_status(playback: &FilePlayback, done: impl Fn(&PlaybackStatus) -> bool) -> PlaybackStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let status = playback.status();
            if done(&status) || Instant::now() > deadline {
                return status;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_missing_file_reports_failure() {
        let playback = FilePlayback::start(Path::new("/nonexistent/posture.mp4"), false);

        let status = wait_for_status(&playback, |s| matches!(s, PlaybackStatus::Failed(_)));

        assert!(matches!(status, PlaybackStatus::Failed(ref m) if m.contains("unable to open")));
        assert!(playback.frames().borrow().is_none());
    }

    #[test]
    fn test_pause_flag_round_trips() {
        let playback = FilePlayback::start(Path::new("/nonexistent/posture.mp4"), true);
        assert!(playback.is_paused());
        playback.set_paused(false);
        assert!(!playback.is_paused());
        playback.stop();
    }
}
