use std::path::PathBuf;
use std::time::Duration;

use mrec_model::{MatchMode, MatchSummary};
use mrec_output::OutputFormat;

/// What a `match` run produced, for the console summary.
#[derive(Debug)]
pub struct MatchOutcome {
    pub base: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub mode: MatchMode,
    pub threshold: f64,
    pub target_rows: usize,
    pub summary: MatchSummary,
    pub elapsed: Duration,
}
