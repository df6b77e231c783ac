use crate::assets::MAX_FRAME_FAILURES;
use crate::capture::CameraProvider;
use crate::media::{CameraError, CameraStream, CaptureConstraints, MediaTrack, VideoFrame};
use async_trait::async_trait;
use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::{Camera, NokhwaError};
use std::thread;
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

/// Camera provider backed by the operating system's capture API.
#[derive(Debug, Clone)]
pub struct NativeCamera {
    index: u32,
}

impl NativeCamera {
    pub fn new(index: u32) -> Self {
        NativeCamera { index }
    }
}

#[async_trait]
impl CameraProvider for NativeCamera {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<CameraStream, CameraError> {
        request_permission().await?;

        let (ready_tx, ready_rx) = oneshot::channel();
        let (frame_tx, frame_rx) = watch::channel(None);
        let stop = CancellationToken::new();

        let index = self.index;
        let worker_stop = stop.clone();
        thread::Builder::new()
            .name(format!("camera-{}", index))
            .spawn(move || capture_loop(index, constraints, ready_tx, frame_tx, worker_stop))
            .map_err(|e| CameraError::Hardware(e.to_string()))?;

        let label = ready_rx
            .await
            .map_err(|_| CameraError::Hardware("capture thread exited".to_string()))??;

        Ok(CameraStream::new(
            vec![MediaTrack::video(label, stop)],
            frame_rx,
        ))
    }
}

#[cfg(target_os = "macos")]
async fn request_permission() -> Result<(), CameraError> {
    let (tx, rx) = oneshot::channel();
    let tx = std::sync::Mutex::new(Some(tx));
    nokhwa::nokhwa_initialize(move |granted| {
        if let Some(tx) = tx.lock().ok().and_then(|mut tx| tx.take()) {
            let _ = tx.send(granted);
        }
    });

    match rx.await {
        Ok(true) => Ok(()),
        _ => Err(CameraError::PermissionDenied),
    }
}

#[cfg(not(target_os = "macos"))]
async fn request_permission() -> Result<(), CameraError> {
    Ok(())
}

fn open_camera(index: u32, constraints: &CaptureConstraints) -> Result<(Camera, String), CameraError> {
    let devices = nokhwa::query(ApiBackend::Auto).map_err(classify)?;
    if devices.is_empty() {
        return Err(CameraError::NoDevice);
    }

    let format = CameraFormat::new(
        Resolution::new(constraints.width, constraints.height),
        FrameFormat::MJPEG,
        constraints.frame_rate,
    );
    let requested =
        RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(format));

    let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(classify)?;
    camera.open_stream().map_err(classify)?;
    let label = camera.info().human_name();
    Ok((camera, label))
}

/// Runs on its own thread: the capture backends block on every frame.
fn capture_loop(
    index: u32,
    constraints: CaptureConstraints,
    ready: oneshot::Sender<Result<String, CameraError>>,
    frames: watch::Sender<Option<VideoFrame>>,
    stop: CancellationToken,
) {
    let mut camera = match open_camera(index, &constraints) {
        Ok((mut camera, label)) => {
            log::info!("Camera {} ({}) opened", index, label);
            if ready.send(Ok(label)).is_err() {
                log::debug!("Camera {} requester went away before start", index);
                let _ = camera.stop_stream();
                return;
            }
            camera
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let resolution = camera.resolution();
    log::info!(
        "Camera {} streaming at {}x{}",
        index,
        resolution.width(),
        resolution.height()
    );

    let mut failures = 0u32;
    while !stop.is_cancelled() {
        match camera
            .frame()
            .and_then(|buffer| buffer.decode_image::<RgbAFormat>())
        {
            Ok(image) => {
                failures = 0;
                let (width, height) = (image.width(), image.height());
                frames.send_replace(Some(VideoFrame::new(width, height, image.into_raw())));
            }
            Err(e) => {
                failures += 1;
                log::warn!("Camera {}: frame error: {}", index, e);
                if failures >= MAX_FRAME_FAILURES {
                    log::error!("Camera {}: giving up after {} failed frames", index, failures);
                    break;
                }
            }
        }
    }

    if let Err(e) = camera.stop_stream() {
        log::warn!("Camera {}: failed to stop stream: {}", index, e);
    }
    // a device lost mid-stream ends the track as well
    stop.cancel();
    log::info!("Camera {} capture stopped", index);
}

fn classify(error: NokhwaError) -> CameraError {
    classify_message(error.to_string())
}

fn classify_message(message: String) -> CameraError {
    let lower = message.to_lowercase();
    if ["permission", "denied", "not authorized", "not permitted"]
        .iter()
        .any(|p| lower.contains(p))
    {
        CameraError::PermissionDenied
    } else if ["no such device", "not found", "no device", "out of range"]
        .iter()
        .any(|p| lower.contains(p))
    {
        CameraError::NoDevice
    } else {
        CameraError::Hardware(message)
    }
}
