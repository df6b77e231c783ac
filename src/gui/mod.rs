//! GUI application runner

mod app;
pub mod common;
mod components;
mod widget;

use crate::config::{Config, app_id};
use iced::window;
use native_dialog::{DialogBuilder, MessageLevel};

use self::app::App;

/// Runs the GUI application with the given configuration.
///
/// If the GUI fails to initialize, an error dialog is shown before returning.
pub fn run(config: Config) {
    let window = window::Settings {
        size: config.window_size,
        min_size: Some(config.min_window_size),
        position: window::Position::Centered,
        exit_on_close_request: false,
        ..Default::default()
    };

    let app = iced::application(move || App::new(config.clone()), App::update, App::view)
        .settings(iced::Settings {
            id: Some(app_id()),
            ..Default::default()
        })
        .title(App::title)
        .window(window)
        .subscription(App::subscription);

    if let Err(e) = app.run() {
        log::error!("Failed to initialize GUI: {e:?}");

        if let Err(e) = DialogBuilder::message()
            .set_title("Gui error")
            .set_text(e.to_string().as_str())
            .set_level(MessageLevel::Warning)
            .alert()
            .show()
        {
            log::error!("Failed to display error dialog: {e:?}");
        }
    }
}
