use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use pid_drive::io::json::{self, TuningReport};
use pid_drive::tuning::Termination;

fn main() -> eframe::Result {
    let path = std::env::args().nth(1).unwrap_or_else(|| "tuning_report.json".to_string());
    let report = match json::read_report_file(&path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("cannot load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let app = TuningViz { report };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Twiddle Tuning", options, Box::new(|_| Ok(Box::new(app))))
}

struct TuningViz {
    report: TuningReport,
}

impl eframe::App for TuningViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let episodes = &self.report.episodes;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Twiddle search: {:?} axis", self.report.tuned_axis));
            ui.label(format!(
                "Best gains: {}  |  Best error: {}  |  Episodes: {} ({} diverged)  |  {}",
                self.report.best_gains,
                self.report
                    .best_error
                    .map_or("-".to_string(), |e| format!("{:.5}", e)),
                self.report.summary.episodes,
                self.report.summary.diverged,
                if self.report.converged { "converged" } else { "in progress" },
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Score per completed episode (log10); diverged episodes dwarf the rest
                ui.vertical(|ui| {
                    ui.label("log10 score (completed episodes)");
                    let points: PlotPoints = episodes
                        .iter()
                        .filter(|r| r.termination == Termination::Completed && r.score > 0.0)
                        .map(|r| [r.episode as f64, r.score.log10()])
                        .collect();
                    Plot::new("score")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Episode")
                        .show(ui, |plot_ui| {
                            plot_ui.points(Points::new("Score", points).radius(3.0));
                        });
                });

                // Running best score
                ui.vertical(|ui| {
                    ui.label("Best score so far (log10)");
                    let mut best = f64::INFINITY;
                    let points: PlotPoints = episodes
                        .iter()
                        .map(|r| {
                            best = best.min(r.score);
                            [r.episode as f64, best.max(1e-12).log10()]
                        })
                        .collect();
                    Plot::new("best")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Episode")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Best", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Candidate gains per episode
                ui.vertical(|ui| {
                    ui.label("Candidate gains");
                    let kp: PlotPoints = episodes.iter().map(|r| [r.episode as f64, r.gains.p()]).collect();
                    let ki: PlotPoints = episodes.iter().map(|r| [r.episode as f64, r.gains.i()]).collect();
                    let kd: PlotPoints = episodes.iter().map(|r| [r.episode as f64, r.gains.d()]).collect();
                    Plot::new("gains")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Episode")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Kp", kp));
                            plot_ui.line(Line::new("Ki", ki));
                            plot_ui.line(Line::new("Kd", kd));
                        });
                });

                // Increment sum shrinking towards the stop threshold
                ui.vertical(|ui| {
                    ui.label("Increment sum");
                    let points: PlotPoints = episodes
                        .iter()
                        .map(|r| [r.episode as f64, r.increments.sum()])
                        .collect();
                    Plot::new("increments")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Episode")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Sum", points));
                        });
                });
            });
        });
    }
}
