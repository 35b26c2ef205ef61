use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use mrec_cli::cli::{ColumnsArgs, MatchArgs};
use mrec_cli::config::{build_config, load_options};
use mrec_cli::logging::{log_data_enabled, redact_value};
use mrec_cli::progress::ScanProgress;
use mrec_ingest::{list_columns, load_table};
use mrec_match::{Reconciliation, reconcile};
use mrec_model::{MatchConfig, MatchResult, Table};
use mrec_output::export;

use crate::types::MatchOutcome;

pub fn run_match(args: &MatchArgs, show_progress: bool) -> Result<MatchOutcome> {
    let start = Instant::now();
    let config = build_config(args)?;
    let options = load_options(args.delimiter, args.infer_types)?;

    let (base, target) = info_span!("ingest").in_scope(|| -> Result<_> {
        let base = load_table(&args.base, &options)
            .with_context(|| format!("load base table {}", args.base.display()))?;
        let target = load_table(&args.target, &options)
            .with_context(|| format!("load target table {}", args.target.display()))?;
        info!(
            base_rows = base.len(),
            target_rows = target.len(),
            duration_ms = start.elapsed().as_millis(),
            "tables loaded"
        );
        Ok((base, target))
    })?;

    let progress = ScanProgress::new(show_progress);
    let report = reconcile(&base, &target, &config, &progress);
    progress.finish();
    let report = report.context("match tables")?;
    log_unmatched(&base, &config, &report);

    let format = export(&report.table, &args.out, args.format.map(Into::into))
        .with_context(|| format!("write report {}", args.out.display()))?;
    info!(
        path = %args.out.display(),
        rows = report.table.len(),
        "report written"
    );

    Ok(MatchOutcome {
        base: args.base.clone(),
        target: args.target.clone(),
        output: args.out.clone(),
        format,
        mode: config.mode,
        threshold: config.effective_threshold(),
        target_rows: target.len(),
        summary: report.summary,
        elapsed: start.elapsed(),
    })
}

pub fn run_columns(args: &ColumnsArgs) -> Result<Vec<String>> {
    let options = load_options(args.delimiter, false)?;
    list_columns(&args.file, &options).with_context(|| format!("read {}", args.file.display()))
}

/// Traces the mapped values of base rows without a match.
fn log_unmatched(base: &Table, config: &MatchConfig, report: &Reconciliation) {
    if !log_data_enabled() || !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for (row, result) in report.results.iter().enumerate() {
        if !matches!(result, MatchResult::NoCandidate) {
            continue;
        }
        for pair in &config.mapping {
            if let Some(value) = base.value(row, &pair.base) {
                trace!(
                    row,
                    field = %pair.base,
                    value = redact_value(&value.to_text()),
                    "unmatched base row"
                );
            }
        }
    }
}
