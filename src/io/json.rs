use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::TunedAxis;
use crate::control::GainVector;
use crate::error::Result;
use crate::tuning::{EpisodeRecord, Termination, Twiddler};

/// Summary statistics computed from a tuning history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningSummary {
    pub episodes: usize,
    pub completed: usize,
    pub diverged: usize,
    pub epochs: usize,
    pub best_score: Option<f64>,
    pub worst_score: Option<f64>,
    pub mean_steps: f64,
}

impl TuningSummary {
    /// `epochs` is the epoch of the last recorded episode; a search that
    /// wrapped after it is one ahead, see [`TuningReport::from_twiddler`].
    pub fn from_history(history: &[EpisodeRecord]) -> Self {
        let diverged = history
            .iter()
            .filter(|r| r.termination == Termination::Diverged)
            .count();

        let best_score = history.iter().map(|r| r.score).reduce(f64::min);
        let worst_score = history.iter().map(|r| r.score).reduce(f64::max);

        let mean_steps = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|r| r.steps as f64).sum::<f64>() / history.len() as f64
        };

        TuningSummary {
            episodes: history.len(),
            completed: history.len() - diverged,
            diverged,
            epochs: history.last().map_or(0, |r| r.epoch),
            best_score,
            worst_score,
            mean_steps,
        }
    }
}

/// Everything worth keeping from a tuning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningReport {
    pub tuned_axis: TunedAxis,
    pub converged: bool,
    pub best_gains: GainVector,
    pub best_error: Option<f64>,
    pub next_gains: GainVector,
    pub increments: GainVector,
    pub summary: TuningSummary,
    pub episodes: Vec<EpisodeRecord>,
}

impl TuningReport {
    /// Snapshot of a tuner, converged or not.
    pub fn from_twiddler(twiddler: &Twiddler) -> Self {
        let search = twiddler.search();
        let mut summary = TuningSummary::from_history(twiddler.history());
        summary.epochs = search.epoch();
        TuningReport {
            tuned_axis: twiddler.config().tuned_axis,
            converged: twiddler.result().is_some(),
            best_gains: search.best_gains(),
            best_error: search.best_error(),
            next_gains: search.current_gains(),
            increments: search.increments(),
            summary,
            episodes: twiddler.history().to_vec(),
        }
    }
}

/// Write a tuning report as pretty-printed JSON.
pub fn write_report<W: Write>(writer: &mut W, report: &TuningReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_report_file(path: impl AsRef<Path>, report: &TuningReport) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_report(&mut file, report)
}

pub fn read_report<R: Read>(reader: R) -> Result<TuningReport> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_report_file(path: impl AsRef<Path>) -> Result<TuningReport> {
    read_report(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TunerConfigBuilder;
    use crate::control::Controller;
    use crate::telemetry::{Measurement, RecordingResponder};

    fn tuned() -> Twiddler {
        let config = TunerConfigBuilder::new()
            .max_steps(20)
            .initial_gains(GainVector::new(0.2, 0.0, 3.0))
            .increments(GainVector::new(0.05, 0.0, 0.5))
            .build()
            .unwrap();
        let mut tw = Twiddler::new(config).unwrap();
        let mut out = RecordingResponder::new();
        // one clean episode, one that leaves the track at step 4
        for step in 0..=20 {
            tw.process(&Measurement::new(0.2, 30.0, 0.0, 0.05).with_step(step), &mut out);
        }
        for step in 0..4 {
            tw.process(&Measurement::new(1.0, 30.0, 0.0, 0.05).with_step(step), &mut out);
        }
        tw.process(&Measurement::new(4.0, 30.0, 0.0, 0.05).with_step(4), &mut out);
        tw
    }

    #[test]
    fn summary_counts_terminations() {
        let tw = tuned();
        let s = TuningSummary::from_history(tw.history());
        assert_eq!(s.episodes, 2);
        assert_eq!(s.completed, 1);
        assert_eq!(s.diverged, 1);
        assert!((s.best_score.unwrap() - 0.04).abs() < 1e-12);
        assert!(s.worst_score.unwrap() > 1e5);
        assert!((s.mean_steps - 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_history_summary() {
        let s = TuningSummary::from_history(&[]);
        assert_eq!(s.episodes, 0);
        assert_eq!(s.best_score, None);
        assert_eq!(s.mean_steps, 0.0);
    }

    #[test]
    fn report_epochs_count_the_wrap_after_the_last_episode() {
        let config = TunerConfigBuilder::new()
            .max_steps(5)
            .initial_gains(GainVector::new(0.2, 0.0, 0.0))
            .increments(GainVector::new(0.05, 0.0, 0.0))
            .build()
            .unwrap();
        let mut tw = Twiddler::new(config).unwrap();
        let mut out = RecordingResponder::new();
        // best, then raise and lower both fail: p reverts and the pass wraps
        for cte in [0.2, 0.5, 0.5] {
            for step in 0..=5 {
                tw.process(&Measurement::new(cte, 30.0, 0.0, 0.05).with_step(step), &mut out);
            }
        }
        assert_eq!(tw.history().len(), 3);
        assert_eq!(tw.history()[2].epoch, 0);
        assert_eq!(tw.search().epoch(), 1);

        let report = TuningReport::from_twiddler(&tw);
        assert_eq!(report.summary.epochs, 1);
        assert_eq!(TuningSummary::from_history(tw.history()).epochs, 0);
    }

    #[test]
    fn report_survives_a_file_trip() {
        let report = TuningReport::from_twiddler(&tuned());
        assert!(!report.converged);

        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let json = String::from_utf8(buf.clone()).unwrap();
        assert!(json.contains("\"best_gains\""));
        assert!(json.contains("\"diverged\""));

        let back = read_report(buf.as_slice()).unwrap();
        assert_eq!(back.episodes.len(), 2);
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.best_gains, report.best_gains);
    }
}
