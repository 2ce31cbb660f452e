use pid_drive::control::{GainVector, Outcome};
use pid_drive::io::{csv, json, TuningReport};
use pid_drive::telemetry::{Measurement, Responder};
use pid_drive::{Session, TunerConfigBuilder};

/// Responder standing in for a simulator link: prints resets and counts
/// control messages.
#[derive(Default)]
struct ConsoleLink {
    controls: usize,
    last_steer: f64,
}

impl Responder for ConsoleLink {
    fn control(&mut self, steer_angle: f64, _throttle: f64) {
        self.controls += 1;
        self.last_steer = steer_angle;
    }

    fn request_manual(&mut self) {
        println!("-> manual");
    }

    fn request_reset(&mut self) {
        println!(
            "-> reset after {} control messages, last steer {:.4}",
            self.controls, self.last_steer
        );
        self.controls = 0;
    }
}

/// Replays a fixed lap trace: a slow weave plus an excursion whose size
/// depends on the episode, so some laps leave the track.
fn lap_trace(lap: usize, step: usize) -> Measurement {
    let t = step as f64 * 0.05;
    let weave = 0.6 * (t * 0.8).sin();
    let excursion = if lap % 4 == 3 && step > 60 { 0.05 * (step - 60) as f64 } else { 0.0 };
    let delta_t = if step == 0 { 0.0 } else { 0.05 };
    Measurement::new(weave + excursion, 30.0 + (t * 0.3).cos(), 0.0, delta_t)
}

fn main() -> pid_drive::Result<()> {
    pid_drive::logging::init_tracing()?;

    let config = TunerConfigBuilder::new()
        .max_steps(200)
        .max_cte(2.5)
        .warmup_steps(5)
        .initial_gains(GainVector::new(0.1, 0.001, 1.0))
        .increments(GainVector::new(0.02, 0.0005, 0.02))
        .build()?;
    let mut session = Session::tuning(config)?;
    let mut link = ConsoleLink::default();

    let mut lap = 0;
    let mut step = 0;
    let result = loop {
        match session.process(&lap_trace(lap, step), &mut link) {
            Outcome::Converged(result) => break result,
            Outcome::ResetRequested { score } => {
                println!("lap {} scored {:.5}", lap, score);
                lap += 1;
                step = 0;
            }
            Outcome::WarmingUp | Outcome::Controlled => step += 1,
        }
    };

    println!();
    println!("Converged after {} episodes ({} epochs)", result.episodes, result.epochs);
    println!("Best gains: {}  error {:.6}", result.best_gains, result.best_error);

    let twiddler = session.into_inner();
    let dir = std::env::temp_dir();
    json::write_report_file(dir.join("tuning_report.json"), &TuningReport::from_twiddler(&twiddler))?;
    csv::write_history_file(dir.join("tuning_history.csv"), twiddler.history())?;
    println!("Report written to {}", dir.display());
    Ok(())
}
