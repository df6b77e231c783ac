use crate::assets::{
    DEFAULT_CAMERA_INDEX, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::media::{CaptureConstraints, SinkOptions};
use clap::{Arg, ArgMatches, Command, value_parser};
use iced::Size;

/// Startup options taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub camera_index: u32,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            camera_index: DEFAULT_CAMERA_INDEX,
        }
    }
}

impl Flags {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Flags {
            camera_index: matches
                .get_one::<u32>("camera")
                .copied()
                .unwrap_or(DEFAULT_CAMERA_INDEX),
        }
    }
}

pub fn cli() -> Command {
    Command::new(app_name())
        .version(app_version())
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("camera")
                .short('c')
                .long("camera")
                .value_name("INDEX")
                .help("Index of the capture device used by \"Use Webcam\".")
                .required(false)
                .value_parser(value_parser!(u32))
                .default_value("0"),
        )
}

#[derive(Debug, Clone)]
pub struct Config {
    pub camera_index: u32,
    pub constraints: CaptureConstraints,
    pub sink: SinkOptions,
    pub window_size: Size,
    pub min_window_size: Size,
}

impl Config {
    pub fn new(flags: Flags) -> Self {
        Config {
            camera_index: flags.camera_index,
            constraints: CaptureConstraints::default(),
            sink: SinkOptions::default(),
            window_size: Size {
                width: WINDOW_WIDTH,
                height: WINDOW_HEIGHT,
            },
            min_window_size: Size {
                width: MIN_WINDOW_WIDTH,
                height: MIN_WINDOW_HEIGHT,
            },
        }
    }
}

pub fn app_id() -> String {
    String::from("app.realfy.posture")
}

/// Returns a version as specified in Cargo.toml
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn app_name() -> &'static str {
    "Realfy Posture App"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults_to_first_device() {
        let matches = cli().get_matches_from(["posture-app"]);
        assert_eq!(Flags::from_matches(&matches), Flags::default());
        assert_eq!(Flags::default().camera_index, 0);
    }

    #[test]
    fn test_camera_index_flag() {
        let matches = cli().get_matches_from(["posture-app", "--camera", "2"]);
        assert_eq!(Flags::from_matches(&matches).camera_index, 2);
    }

    #[test]
    fn test_rejects_non_numeric_camera() {
        assert!(cli().try_get_matches_from(["posture-app", "-c", "front"]).is_err());
    }

    #[test]
    fn test_config_requests_hd_camera_with_autoplay() {
        let config = Config::new(Flags { camera_index: 1 });
        assert_eq!(config.camera_index, 1);
        assert_eq!((config.constraints.width, config.constraints.height), (1280, 720));
        assert!(config.sink.autoplay);
        assert!(config.sink.controls);
    }
}
