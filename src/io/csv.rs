use std::io::{self, Write};
use std::path::Path;

use crate::tuning::{EpisodeRecord, Termination};

/// Write tuning history to CSV format.
///
/// Columns: episode, epoch, termination, steps, score,
///          kp, ki, kd, dp, di, dd, best_error
pub fn write_history<W: Write>(writer: &mut W, history: &[EpisodeRecord]) -> io::Result<()> {
    writeln!(
        writer,
        "episode,epoch,termination,steps,score,\
         kp,ki,kd,dp,di,dd,best_error"
    )?;

    for r in history {
        let termination = match r.termination {
            Termination::Completed => "completed",
            Termination::Diverged => "diverged",
        };
        // empty cell until a first score exists
        let best = r.best_error.map(|b| format!("{:.6}", b)).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{:.6},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
            r.episode,
            r.epoch,
            termination,
            r.steps,
            r.score,
            r.gains.p(), r.gains.i(), r.gains.d(),
            r.increments.p(), r.increments.i(), r.increments.d(),
            best,
        )?;
    }

    Ok(())
}

/// Write tuning history to a CSV file at the given path.
pub fn write_history_file(path: impl AsRef<Path>, history: &[EpisodeRecord]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_history(&mut file, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::GainVector;

    #[test]
    fn csv_output_has_header_and_rows() {
        let history = vec![
            EpisodeRecord {
                episode: 0,
                epoch: 0,
                termination: Termination::Completed,
                steps: 100,
                score: 0.25,
                gains: GainVector::new(0.2, 0.0, 3.0),
                increments: GainVector::new(0.05, 0.0, 0.5),
                best_error: None,
            },
            EpisodeRecord {
                episode: 1,
                epoch: 0,
                termination: Termination::Diverged,
                steps: 12,
                score: 83_333.5,
                gains: GainVector::new(0.25, 0.0, 3.0),
                increments: GainVector::new(0.05, 0.0, 0.5),
                best_error: Some(0.25),
            },
        ];

        let mut buf = Vec::new();
        write_history(&mut buf, &history).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("episode,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0,0,completed,100,0.250000,"));
        assert!(lines[1].ends_with(","));
        assert!(lines[2].contains("diverged"));
        assert!(lines[2].ends_with("0.250000"));
    }
}
