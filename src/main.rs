use crate::config::{Config, Flags, cli};
use std::{panic, process};

pub mod assets;
pub mod capture;
pub mod config;
pub mod decoder;
pub mod gui;
pub mod media;

fn main() {
    tracing_subscriber::fmt::init();

    let matches = cli().get_matches();
    let flags = Flags::from_matches(&matches);

    // kill the main thread as soon as a secondary thread panics
    let orig_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        process::exit(105);
    }));

    // gracefully close the app when receiving SIGINT, SIGTERM, or SIGHUP
    if let Err(e) = ctrlc::set_handler(move || {
        process::exit(130);
    }) {
        log::warn!("Error setting Ctrl-C handler: {}", e);
    }

    gui::run(Config::new(flags));
}
