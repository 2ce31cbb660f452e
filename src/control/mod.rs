pub mod controller;
pub mod filter;
pub mod gains;
pub mod pid;
pub mod production;

pub use controller::{Controller, Outcome};
pub use filter::LowPassFilter;
pub use gains::{GainIndex, GainVector};
pub use pid::{PidController, DEFAULT_DERIVATIVE_WINDOW};
pub use production::ProductionController;
