mod handoff;
pub mod messages;

pub use handoff::Handoff;
