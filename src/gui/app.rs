use crate::assets::{DISPLAY_REFRESH, VIDEO_EXTENSIONS};
use crate::capture::{CameraProvider, NativeCamera};
use crate::config::{Config, app_name};
use crate::gui::common::Handoff;
use crate::gui::common::messages::AppEvent;
use crate::gui::components::buttons::{ActionButton, ButtonKind, Dimensions};
use crate::gui::components::video::Video;
use crate::gui::widget::{Column, Container, Element, Row, Text};
use crate::media::{CameraOutcome, CameraRequest, MediaSourceController, SelectedFile};
use iced::{Alignment, Length, Subscription, Task, window};
use native_dialog::DialogBuilder;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    controller: MediaSourceController<Video>,
    camera: Arc<dyn CameraProvider>,
    /// Acquisition still in flight; the device is busy until it reports back.
    pending: Option<CameraRequest>,
}

impl App {
    pub fn new(config: Config) -> (Self, Task<AppEvent>) {
        let camera = Arc::new(NativeCamera::new(config.camera_index));
        (Self::with_provider(config, camera), Task::none())
    }

    fn with_provider(config: Config, camera: Arc<dyn CameraProvider>) -> Self {
        let controller =
            MediaSourceController::new(Video::new(config.sink)).with_constraints(config.constraints);
        App {
            controller,
            camera,
            pending: None,
        }
    }

    pub fn title(&self) -> String {
        String::from(app_name())
    }

    pub fn update(&mut self, message: AppEvent) -> Task<AppEvent> {
        match message {
            AppEvent::UploadVideo => Task::perform(
                async {
                    tokio::task::spawn_blocking(pick_video_file)
                        .await
                        .unwrap_or_else(|e| {
                            log::warn!("File picker task failed: {}", e);
                            None
                        })
                },
                AppEvent::FileChosen,
            ),
            AppEvent::FileChosen(path) => {
                self.controller.select_file(path.map(SelectedFile::new));
                Task::none()
            }
            AppEvent::StartWebcam => {
                if let Some(pending) = self.pending {
                    log::debug!("Webcam request {} still pending", pending.token());
                    return Task::none();
                }
                let request = self.controller.begin_camera_request();
                self.pending = Some(request);
                let camera = Arc::clone(&self.camera);
                Task::future(async move {
                    let result = camera.acquire(request.constraints()).await;
                    AppEvent::WebcamAcquired(request, Handoff::new(result))
                })
            }
            AppEvent::WebcamAcquired(request, result) => {
                if self.pending == Some(request) {
                    self.pending = None;
                }
                let Some(result) = result.take() else {
                    return Task::none();
                };
                match self.controller.complete_camera_request(request, result) {
                    CameraOutcome::Attached => log::debug!("Webcam request {} attached", request.token()),
                    CameraOutcome::Superseded => log::debug!("Webcam request {} superseded", request.token()),
                    CameraOutcome::Failed(_) => {}
                }
                Task::none()
            }
            AppEvent::StopWebcam => {
                self.controller.stop_camera();
                Task::none()
            }
            AppEvent::TogglePause => {
                self.controller.sink_mut().toggle_pause();
                Task::none()
            }
            AppEvent::FrameTick => {
                self.controller.sink_mut().refresh();
                Task::none()
            }
            AppEvent::ExitApp => {
                self.controller.teardown();
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, AppEvent> {
        let webcam = if self.controller.camera_active() {
            ActionButton::new("Stop Webcam")
                .kind(ButtonKind::Danger)
                .build(AppEvent::StopWebcam)
        } else if self.pending.is_some() {
            ActionButton::new("Opening…")
                .kind(ButtonKind::Secondary)
                .build_maybe(None)
        } else {
            ActionButton::new("Use Webcam")
                .kind(ButtonKind::Secondary)
                .build(AppEvent::StartWebcam)
        };

        let buttons = Row::new()
            .spacing(12)
            .push(
                ActionButton::new("Upload Video")
                    .dim(Dimensions::Large)
                    .build(AppEvent::UploadVideo),
            )
            .push(webcam);

        Container::new(
            Column::new()
                .spacing(20)
                .padding(24)
                .align_x(Alignment::Center)
                .push(Text::new(app_name()).size(28))
                .push(buttons)
                .push(self.controller.sink().view()),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<AppEvent> {
        let mut batch = vec![window::close_requests().map(|_| AppEvent::ExitApp)];
        if self.controller.sink().has_attachment() {
            batch.push(iced::time::every(DISPLAY_REFRESH).map(|_| AppEvent::FrameTick));
        }
        Subscription::batch(batch)
    }
}

/// Native "Upload Video" picker, filtered to video files.
fn pick_video_file() -> Option<PathBuf> {
    match DialogBuilder::file()
        .set_title("Upload Video")
        .add_filter("Video", VIDEO_EXTENSIONS)
        .open_single_file()
        .show()
    {
        Ok(path) => path,
        Err(e) => {
            log::warn!("Failed to open the file picker: {}", e);
            None
        }
    }
}
