pub mod measurement;
pub mod responder;

pub use measurement::Measurement;
pub use responder::{Command, RecordingResponder, Responder};
