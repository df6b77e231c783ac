//! Video display component

#[allow(clippy::module_inception)]
mod video;

pub use video::Video;
