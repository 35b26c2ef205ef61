//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mrec_model::{FieldPair, MatchMode, OutputMode};
use mrec_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "mrec",
    version,
    about = "Reconcile two media-title tables and report row-level matches",
    long_about = "Reconcile a base table against a target table.\n\n\
                  Each base row is matched by fuzzy similarity over mapped fields or by\n\
                  shared tokens in delimited list fields (cast, directors), optionally\n\
                  restricted to rows with an equal key such as the release year.\n\
                  The report is written as UTF-8 CSV or as a status-colored XLSX sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a base table against a target table and write the report.
    Match(MatchArgs),

    /// List the columns of a delimited file or spreadsheet.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Reference table, delimited text or a spreadsheet (every row appears in the report).
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Table searched for matches.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Report path; `.csv` or `.xlsx` selects the format.
    #[arg(long = "out", short = 'o', value_name = "PATH")]
    pub out: PathBuf,

    /// JSON match configuration; flags below override its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mapped field pair, repeatable. A bare NAME maps a field onto itself.
    #[arg(long = "map", value_name = "BASE=TARGET", value_parser = parse_field_pair)]
    pub map: Vec<FieldPair>,

    /// Only compare rows whose values of these fields are equal.
    #[arg(long = "key", value_name = "BASE=TARGET", value_parser = parse_field_pair)]
    pub key: Option<FieldPair>,

    /// Target fields copied into the report (comma separated or repeated).
    #[arg(long = "feedback", value_name = "FIELD", value_delimiter = ',')]
    pub feedback: Vec<String>,

    /// Acceptance threshold: similarity percent, or minimum shared tokens.
    #[arg(long = "threshold", value_name = "N")]
    pub threshold: Option<f64>,

    /// Scoring mode (default: fuzzy).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Which qualifying candidates are kept per base row (default: best-only).
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Keep at most N matches per base row (implies --policy top-n).
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Report shape (default: single-row).
    #[arg(long = "output-mode", value_enum)]
    pub output_mode: Option<OutputModeArg>,

    /// Report format (default: from the --out extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Field delimiter of delimited input files; spreadsheets ignore it.
    #[arg(long = "delimiter", default_value = ",")]
    pub delimiter: char,

    /// Read numeric columns as numbers instead of text.
    #[arg(long = "infer-types")]
    pub infer_types: bool,

    /// Score base rows in parallel.
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Scan every target row instead of using the token index.
    #[arg(long = "no-index")]
    pub no_index: bool,

    /// Skip the field-by-field comparison of accepted matches.
    #[arg(long = "no-diffs")]
    pub no_diffs: bool,

    /// Prefix of feedback columns in the report.
    #[arg(long = "feedback-prefix", value_name = "PREFIX")]
    pub feedback_prefix: Option<String>,

    /// Value written for feedback fields without a match.
    #[arg(long = "absent-marker", value_name = "TEXT")]
    pub absent_marker: Option<String>,

    /// Joins feedback values of several matches in single-row reports.
    #[arg(long = "separator", value_name = "TEXT")]
    pub separator: Option<String>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "delimiter", default_value = ",")]
    pub delimiter: char,
}

fn parse_field_pair(value: &str) -> Result<FieldPair, String> {
    FieldPair::parse(value).ok_or_else(|| format!("expected BASE=TARGET or NAME, got '{value}'"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Token-sort similarity over the mapped fields, 0-100.
    Fuzzy,
    /// Count of shared tokens across mapped list fields.
    #[value(alias = "tokens")]
    SetIntersection,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fuzzy => Self::Fuzzy,
            ModeArg::SetIntersection => Self::SetIntersection,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// The single highest-scoring candidate.
    BestOnly,
    /// Every candidate at or above the threshold, best first.
    AllQualifying,
    /// The best N qualifying candidates, set with --top-n.
    TopN,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputModeArg {
    /// One report row per base row.
    #[value(alias = "single")]
    SingleRow,
    /// One report row per accepted match.
    Exploded,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::SingleRow => Self::SingleRow,
            OutputModeArg::Exploded => Self::Exploded,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Xlsx => Self::Xlsx,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
