pub mod runner;
pub mod state;

pub use runner::Session;
pub use state::EpisodePhase;
