use serde::{Deserialize, Serialize};

/// Outbound side of the simulator link.
///
/// Implemented by the transport. The core never learns whether a request
/// was honoured, except through the measurements that follow it.
pub trait Responder {
    /// Emit an actuator command.
    fn control(&mut self, steer_angle: f64, throttle: f64);

    /// Ask the simulator to hand control back to the driver.
    fn request_manual(&mut self);

    /// Ask the simulator to restart the episode.
    fn request_reset(&mut self);
}

/// A single message sent through a [`Responder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Control { steer_angle: f64, throttle: f64 },
    Manual,
    Reset,
}

/// Responder that keeps every command in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingResponder {
    pub commands: Vec<Command>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Command> {
        self.commands.last()
    }

    pub fn resets(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, Command::Reset)).count()
    }

    pub fn controls(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Control { steer_angle, throttle } => Some((*steer_angle, *throttle)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Responder for RecordingResponder {
    fn control(&mut self, steer_angle: f64, throttle: f64) {
        self.commands.push(Command::Control { steer_angle, throttle });
    }

    fn request_manual(&mut self) {
        self.commands.push(Command::Manual);
    }

    fn request_reset(&mut self) {
        self.commands.push(Command::Reset);
    }
}
