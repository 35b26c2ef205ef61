//! Scan progress on the terminal.

use indicatif::{ProgressBar, ProgressStyle};
use mrec_match::Progress;
use tracing::info;

const TEMPLATE: &str =
    "  [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} base rows matched ({eta})";

/// Progress sink for a reconciliation scan.
///
/// Draws a bar on stderr when visible and logs every tenth of the scan at
/// info level. A hidden bar still counts rows.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            let style = ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ");
            ProgressBar::new(0).with_style(style)
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Rows reported so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Removes the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Progress for ScanProgress {
    fn row_done(&self, done: usize, total: usize) {
        let total_rows = total as u64;
        if self.bar.length() != Some(total_rows) {
            self.bar.set_length(total_rows);
        }
        self.bar.inc(1);

        if total == 0 || done == 0 {
            return;
        }
        let decile = done * 10 / total;
        if decile != (done - 1) * 10 / total {
            self.bar
                .suspend(|| info!(done, total, percent = decile * 10, "matching progress"));
        }
    }
}
