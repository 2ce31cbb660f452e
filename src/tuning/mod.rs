pub mod episode;
pub mod twiddle;
pub mod twiddler;

pub use episode::{EpisodeRecord, Termination};
pub use twiddle::{ProbePhase, TwiddleStep, CONVERGENCE_TOLERANCE};
pub use twiddler::{Twiddler, TuningResult};
