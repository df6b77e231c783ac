pub mod buttons;
pub mod video;
