//! Live timer gauge for the session host

use gavel_domain::{TimerState, format_clock, progress_percent};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress bar mirroring one timer
pub struct TimerGauge {
    bar: ProgressBar,
}

impl TimerGauge {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{msg:>8} [{bar:40.cyan/blue}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    /// Redraw from the latest timer snapshot
    pub fn update(&self, timer: &TimerState) {
        let percent = progress_percent(timer).clamp(0.0, 100.0);
        self.bar.set_position(percent as u64);
        self.bar.set_message(format_clock(timer));
    }

    /// Clear the gauge from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for TimerGauge {
    fn default() -> Self {
        Self::new()
    }
}
