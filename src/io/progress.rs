//! Progress display for the learning and regeneration passes

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} blocks {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Block-level progress bar for one pass at a time
///
/// A hidden reporter accepts the same calls and draws nothing, so callers do
/// not need to branch on quiet mode.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PASS_STYLE.clone());
        Self { bar }
    }

    /// Create a reporter that never draws
    pub fn hidden() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Reset the bar for a pass over `total` blocks
    pub fn start_pass(&self, label: &str, total: usize) {
        self.bar.reset();
        self.bar.set_prefix(label.to_string());
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message(String::new());
    }

    /// Advance by one block
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Blocks processed in the current pass
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish the current pass, leaving `message` next to the bar
    pub fn finish_pass(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
