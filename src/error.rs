use thiserror::Error;

/// Errors surfaced by the controller, tuner and their persistence helpers.
///
/// Divergence and search convergence are not errors; they are reported
/// through [`crate::control::Outcome`].
#[derive(Error, Debug)]
pub enum Error {
    /// A gain slot was looked up with an index outside `0..3`.
    #[error("gain index {0} out of range, expected 0, 1 or 2")]
    GainIndex(usize),

    /// A configuration value breaks one of its invariants.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The global tracing subscriber could not be installed.
    #[error("tracing init failed: {0}")]
    Tracing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
