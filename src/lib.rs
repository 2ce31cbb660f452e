pub mod config;
pub mod control;
pub mod error;
pub mod io;
pub mod logging;
pub mod session;
pub mod telemetry;
pub mod tuning;

pub use config::{ProductionConfig, TunedAxis, TunerConfig, TunerConfigBuilder};
pub use control::{Controller, GainIndex, GainVector, LowPassFilter, Outcome, PidController, ProductionController};
pub use error::{Error, Result};
pub use session::{EpisodePhase, Session};
pub use telemetry::{Command, Measurement, RecordingResponder, Responder};
pub use tuning::{EpisodeRecord, Termination, TuningResult, TwiddleStep, Twiddler};
