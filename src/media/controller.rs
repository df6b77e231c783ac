//! Media Source Controller
//!
//! Owns the display sink and the active-source slot. Every change of what
//! the sink shows goes through [`MediaSourceController::select_file`],
//! the camera request pair ([`begin_camera_request`] /
//! [`complete_camera_request`]) or [`MediaSourceController::stop_camera`].
//!
//! Camera acquisition is asynchronous, so each user intent bumps a request
//! token. A camera result is attached only if its token is still the current
//! one; a late stream is stopped and dropped instead.
//!
//! [`begin_camera_request`]: MediaSourceController::begin_camera_request
//! [`complete_camera_request`]: MediaSourceController::complete_camera_request

use crate::capture::CameraProvider;
use crate::media::{
    ActiveSource, CameraError, CameraStream, CaptureConstraints, DiagnosticChannel, DisplaySink,
    LogDiagnostics, PlayableRef, ReferenceStore, SelectedFile, SourceKind,
};
use std::mem;

/// Ticket for an in-flight camera acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraRequest {
    token: u64,
    constraints: CaptureConstraints,
}

impl CameraRequest {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn constraints(&self) -> CaptureConstraints {
        self.constraints
    }
}

/// How a camera request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraOutcome {
    /// The stream is attached and playing.
    Attached,
    /// Acquisition failed; the state is unchanged.
    Failed(CameraError),
    /// A newer intent arrived while acquiring; the stream was stopped.
    Superseded,
}

pub struct MediaSourceController<S: DisplaySink, D: DiagnosticChannel = LogDiagnostics> {
    sink: S,
    diagnostics: D,
    active: ActiveSource,
    references: ReferenceStore,
    constraints: CaptureConstraints,
    token: u64,
}

impl<S: DisplaySink> MediaSourceController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_diagnostics(sink, LogDiagnostics)
    }
}

impl<S: DisplaySink, D: DiagnosticChannel> MediaSourceController<S, D> {
    pub fn with_diagnostics(sink: S, diagnostics: D) -> Self {
        MediaSourceController {
            sink,
            diagnostics,
            active: ActiveSource::Idle,
            references: ReferenceStore::new(),
            constraints: CaptureConstraints::default(),
            token: 0,
        }
    }

    pub fn with_constraints(mut self, constraints: CaptureConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn kind(&self) -> SourceKind {
        self.active.kind()
    }

    /// Drives the visibility of the start/stop camera control.
    pub fn camera_active(&self) -> bool {
        self.active.is_camera()
    }

    pub fn attached_reference(&self) -> Option<&PlayableRef> {
        self.active.reference()
    }

    pub fn attached_stream(&self) -> Option<&CameraStream> {
        self.active.stream()
    }

    pub fn live_references(&self) -> usize {
        self.references.live_count()
    }

    /// Attach a newly selected file. `None` (picker dismissed) changes nothing.
    ///
    /// An attached camera is stopped before the file is attached, and the
    /// previous playable reference is released.
    pub fn select_file(&mut self, file: Option<SelectedFile>) -> bool {
        let Some(file) = file else {
            return false;
        };

        self.token += 1;
        self.release(SourceKind::File);

        let reference = self.references.create(&file);
        log::info!("Playing file {} ({})", file.name(), reference.url());
        self.sink.attach_reference(&reference);
        self.sink.play();
        self.active = ActiveSource::FileAttached(reference);
        true
    }

    /// Start of a camera request; supersedes every earlier request.
    pub fn begin_camera_request(&mut self) -> CameraRequest {
        self.token += 1;
        CameraRequest {
            token: self.token,
            constraints: self.constraints,
        }
    }

    /// Apply the result of the acquisition started by `request`.
    pub fn complete_camera_request(
        &mut self,
        request: CameraRequest,
        result: Result<CameraStream, CameraError>,
    ) -> CameraOutcome {
        let mut stream = match result {
            Ok(stream) => stream,
            Err(error) => {
                self.diagnostics.camera_failure(&error);
                return CameraOutcome::Failed(error);
            }
        };

        if request.token != self.token {
            let stopped = stream.stop();
            log::debug!(
                "Discarding camera request {} (current {}), stopped {} track(s)",
                request.token,
                self.token,
                stopped
            );
            return CameraOutcome::Superseded;
        }

        self.release(SourceKind::Camera);

        log::info!("Camera attached with {} track(s)", stream.tracks().len());
        self.sink.attach_stream(&stream);
        self.sink.play();
        self.active = ActiveSource::CameraAttached(stream);
        CameraOutcome::Attached
    }

    /// Acquire a stream from `provider` and attach it.
    pub async fn start_camera<P>(&mut self, provider: &P) -> CameraOutcome
    where
        P: CameraProvider + ?Sized,
    {
        let request = self.begin_camera_request();
        let result = provider.acquire(request.constraints()).await;
        self.complete_camera_request(request, result)
    }

    /// Stop the camera and detach it from the sink. A no-op unless a camera
    /// is attached; any pending camera request is invalidated either way.
    pub fn stop_camera(&mut self) -> bool {
        self.token += 1;
        if !self.camera_active() {
            return false;
        }

        self.release(SourceKind::Idle);
        self.sink.clear();
        true
    }

    /// Release every resource and detach the sink. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.token += 1;
        match mem::take(&mut self.active) {
            ActiveSource::CameraAttached(mut stream) => {
                stream.stop();
            }
            ActiveSource::FileAttached(reference) => {
                self.references.revoke(&reference);
            }
            ActiveSource::Idle => {}
        }
        self.sink.clear();
    }

    /// Vacate the active slot ahead of a transition to `next`.
    fn release(&mut self, next: SourceKind) {
        debug_assert!(
            self.kind().can_transition_to(&next),
            "invalid source transition {} -> {}",
            self.kind(),
            next
        );

        match mem::take(&mut self.active) {
            ActiveSource::CameraAttached(mut stream) => {
                let stopped = stream.stop();
                log::info!("Camera stopped ({} track(s))", stopped);
            }
            ActiveSource::FileAttached(reference) => {
                self.references.revoke(&reference);
            }
            ActiveSource::Idle => {}
        }
    }
}

impl<S: DisplaySink, D: DiagnosticChannel> Drop for MediaSourceController<S, D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
