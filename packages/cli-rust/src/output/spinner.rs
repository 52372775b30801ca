//! Spinner shown while host keys are being scanned
//!
//! Key scans wait on the network, so the user gets an animated indicator
//! with elapsed time until the scan and append finish.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A spinner with elapsed time display that is a no-op in quiet mode
///
/// # Example
///
/// ```ignore
/// let spinner = CommandSpinner::new_maybe("Scanning github.com...", quiet);
/// // ... scan ...
/// spinner.success("Trusted github.com");
/// ```
pub struct CommandSpinner {
    bar: Option<ProgressBar>,
}

impl CommandSpinner {
    /// Create a spinner that ticks every 100ms, drawn on stderr
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed:.dim})")
                .expect("invalid spinner template"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Create a spinner that respects quiet mode
    pub fn new_maybe(message: &str, quiet: bool) -> Self {
        if quiet {
            Self { bar: None }
        } else {
            Self::new(message)
        }
    }

    /// Finish with a green checkmark
    pub fn success(self, message: &str) {
        self.finish(console::style("\u{2713}").green().to_string(), message);
    }

    /// Finish with a dim dash, for work that turned out to be unnecessary
    pub fn skipped(self, message: &str) {
        self.finish(console::style("-").dim().to_string(), message);
    }

    /// Finish with a red X
    pub fn fail(self, message: &str) {
        self.finish(console::style("\u{2717}").red().to_string(), message);
    }

    fn finish(self, marker: String, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_with_message(format!("{marker} {message}"));
        }
    }
}
