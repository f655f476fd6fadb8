//! Progress reporting for resolution attempts
//!
//! Both reporters write to stderr so JSON on stdout stays clean.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parcel_application::ports::progress::{AttemptOutcome, ResolutionProgress};
use parcel_domain::{Query, ResolutionResult, SourceAttempt};
use std::sync::Mutex;

/// Progress bar over the attempt list
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn attempt_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionProgress for ProgressReporter {
    fn on_resolution_start(&self, _query: &Query, total_attempts: usize) {
        let bar = ProgressBar::with_draw_target(
            Some(total_attempts as u64),
            ProgressDrawTarget::stderr(),
        );
        bar.set_style(Self::attempt_style());
        bar.set_prefix("Resolving");
        bar.set_message("starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_attempt_start(&self, _index: usize, attempt: &SourceAttempt) {
        self.with_bar(|bar| bar.set_message(attempt.describe()));
    }

    fn on_attempt_complete(&self, _index: usize, _attempt: &SourceAttempt, outcome: &AttemptOutcome) {
        self.with_bar(|bar| {
            if *outcome == AttemptOutcome::Accepted {
                bar.set_message(format!("{} match", "v".green()));
            }
            bar.inc(1);
        });
    }

    fn on_resolution_complete(&self, result: &ResolutionResult) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = guard.take() {
            let message = if result.is_match() {
                format!("{} ({}%)", "matched".green(), result.match_confidence)
            } else if result.ok {
                "no match".yellow().to_string()
            } else {
                "failed".red().to_string()
            };
            bar.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ResolutionProgress for SimpleProgress {
    fn on_resolution_start(&self, query: &Query, total_attempts: usize) {
        eprintln!(
            "{} {} ({} attempts)",
            "->".cyan(),
            query.to_string().bold(),
            total_attempts
        );
    }

    fn on_attempt_complete(&self, index: usize, attempt: &SourceAttempt, outcome: &AttemptOutcome) {
        let mark = match outcome {
            AttemptOutcome::Accepted => "v".green(),
            AttemptOutcome::Rejected => "-".yellow(),
            AttemptOutcome::Unavailable(_) => "x".red(),
        };
        match outcome {
            AttemptOutcome::Unavailable(reason) => {
                eprintln!("  {} {:>3} {} ({})", mark, index + 1, attempt.describe(), reason)
            }
            _ => eprintln!("  {} {:>3} {}", mark, index + 1, attempt.describe()),
        }
    }

    fn on_resolution_complete(&self, _result: &ResolutionResult) {
        eprintln!();
    }
}
