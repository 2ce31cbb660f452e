use pid_drive::io::json::{self, TuningReport};
use pid_drive::tuning::Termination;

const DEFAULT_REPORT: &str = "tuning_report.json";

fn main() -> pid_drive::Result<()> {
    pid_drive::logging::init_tracing()?;

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_REPORT.to_string());
    let report = json::read_report_file(&path)?;
    tracing::info!(path = %path, episodes = report.episodes.len(), "loaded tuning report");

    print_report(&report);
    Ok(())
}

fn print_report(report: &TuningReport) {
    let s = &report.summary;

    println!();
    println!("====================================================================");
    println!("  TWIDDLE TUNING REPORT ({:?} axis)", report.tuned_axis);
    println!("====================================================================");
    println!();

    println!("  Result");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Status:        {:>10}    Epochs:       {:>8}",
        if report.converged { "CONVERGED" } else { "RUNNING" },
        s.epochs
    );
    println!("  Best gains:    {}", report.best_gains);
    match report.best_error {
        Some(e) => println!("  Best error:    {:>12.6}", e),
        None => println!("  Best error:    {:>12}", "-"),
    }
    println!("  Next gains:    {}", report.next_gains);
    println!(
        "  Increments:    {}   (sum {:.5})",
        report.increments,
        report.increments.sum()
    );
    println!();

    println!("  Episodes");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Total: {:>6}    Completed: {:>6}    Diverged: {:>6}    Mean steps: {:.0}",
        s.episodes, s.completed, s.diverged, s.mean_steps
    );
    println!();
    println!(
        "  {:>5}  {:>5}  {:>6}  {:>14}  {:>9}  {:>9}  {:>9}  {:>4}",
        "ep", "epoch", "steps", "score", "kp", "ki", "kd", "end"
    );
    println!("  {}", "─".repeat(66));

    for r in &report.episodes {
        let end = match r.termination {
            Termination::Completed => "OK",
            Termination::Diverged => "OFF",
        };
        let marker = if r.improved() { "*" } else { " " };
        println!(
            "  {:>5}  {:>5}  {:>6}  {:>14.6}{} {:>9.5}  {:>9.5}  {:>9.5}  {:>4}",
            r.episode,
            r.epoch,
            r.steps,
            r.score,
            marker,
            r.gains.p(),
            r.gains.i(),
            r.gains.d(),
            end
        );
    }

    println!();
    println!("  * new best score");
    println!("====================================================================");
    println!();
}
