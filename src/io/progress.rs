//! Progress display and per-frame diagnostics on stderr

use crate::algorithm::search::{Frame, RunSummary};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static BOUNDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static UNBOUNDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("[{elapsed_precise}] {spinner} {pos} iterations {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Reports search progress without touching the frame stream
///
/// Diagnostic lines are logged with the bar suspended, so the bar redraw
/// never splits a log record.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter for a run with the given budget
    ///
    /// With `show_bar` false only log records are produced.
    pub fn new(iterations: Option<usize>, show_bar: bool) -> Self {
        let bar = show_bar.then(|| {
            let bar = match iterations {
                Some(total) => {
                    let bar = ProgressBar::new(total as u64);
                    bar.set_style(BOUNDED_STYLE.clone());
                    bar
                }
                None => {
                    let bar = ProgressBar::new_spinner();
                    bar.set_style(UNBOUNDED_STYLE.clone());
                    bar
                }
            };
            bar.set_draw_target(ProgressDrawTarget::stderr());
            bar
        });

        Self { bar }
    }

    /// Reporter that only logs
    pub const fn hidden() -> Self {
        Self { bar: None }
    }

    /// Whether a bar is being drawn
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance to the given number of completed iterations
    pub fn update_iteration(&self, completed: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(completed as u64);
        }
    }

    /// Log an accepted frame
    pub fn record_accept(&self, frame: &Frame<'_>) {
        let line = accept_line(frame.iteration, frame.energy);
        match self.bar {
            Some(ref bar) => {
                bar.set_message(format!("E={}", frame.energy));
                bar.suspend(|| log::info!("{line}"));
            }
            None => log::info!("{line}"),
        }
    }

    /// Close the bar and log the run totals
    pub fn finish(&self, summary: &RunSummary) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        log::info!(
            "Finished: iterations={}, accepted={}, E={}",
            summary.iterations,
            summary.accepted,
            summary.best_energy
        );
    }
}

/// Diagnostic line for an accepted frame
pub fn accept_line(iteration: usize, energy: f64) -> String {
    format!("A: I={iteration}, E={energy}")
}
