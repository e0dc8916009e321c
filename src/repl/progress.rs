use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::formatting::format_duration;

/// Spinner shown while a remote call is outstanding.
pub struct CallProgress {
    bar: ProgressBar,
    start_time: Instant,
}

impl CallProgress {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg} {elapsed:.dim}") {
            bar.set_style(style);
        }
        bar.set_message(format!("{} (in progress)", message));
        bar.enable_steady_tick(Duration::from_millis(120));

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    /// No-op spinner for `--quiet` and non-terminal output.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> String {
        format_duration(self.start_time.elapsed().as_millis() as u64)
    }

    /// Remove the spinner; the caller renders the outcome itself.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
