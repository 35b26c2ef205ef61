//! Builds the report table from base rows and their match results.

use mrec_model::{CellValue, MatchCandidate, MatchResult, ModelError, OutputMode, Status, Table};

use crate::plan::MatchPlan;

/// Separator between diff labels in the `DIFF` column.
pub const DIFF_SEPARATOR: &str = "; ";

/// Assembles the output table in the plan's output mode.
///
/// Columns follow [`MatchPlan::output_columns`]. Single-row output keeps one
/// row per base row; exploded output has one row per accepted match, and a
/// single `FAILED` row for a base row without one.
pub fn assemble(
    base: &Table,
    target: &Table,
    plan: &MatchPlan,
    results: &[MatchResult],
) -> Result<Table, ModelError> {
    let mut table = Table::new(base.name.clone(), plan.output_columns(base))?;
    let assembler = Assembler { target, plan };

    for (row, result) in base.rows().iter().zip(results) {
        match plan.output.mode {
            OutputMode::SingleRow => {
                let mut cells = row.cells.clone();
                assembler.single_row(result, &mut cells);
                table.push_row(cells)?;
            }
            OutputMode::Exploded => {
                if result.is_empty() {
                    let mut cells = row.cells.clone();
                    assembler.failed_row(&mut cells);
                    table.push_row(cells)?;
                }
                for (rank, (candidate, diffs)) in result.matches().enumerate() {
                    let mut cells = row.cells.clone();
                    assembler.exploded_row(candidate, diffs, rank + 1, &mut cells);
                    table.push_row(cells)?;
                }
            }
        }
    }
    Ok(table)
}

struct Assembler<'a> {
    target: &'a Table,
    plan: &'a MatchPlan,
}

impl Assembler<'_> {
    fn absent(&self) -> CellValue {
        CellValue::Text(self.plan.output.absent_marker.clone())
    }

    fn feedback_value(&self, candidate: &MatchCandidate, column: usize) -> String {
        let value = self.target.cell(candidate.target_row, column).to_text();
        if value.is_empty() {
            self.plan.output.absent_marker.clone()
        } else {
            value.into_owned()
        }
    }

    /// `STATUS` and `DIFF` describe the top candidate only; the other
    /// accepted candidates show up in `MATCH_COUNT` and the joined feedback.
    fn single_row(&self, result: &MatchResult, cells: &mut Vec<CellValue>) {
        for feedback in &self.plan.feedback {
            if result.is_empty() {
                cells.push(self.absent());
                continue;
            }
            let joined = result
                .candidates()
                .iter()
                .map(|candidate| self.feedback_value(candidate, feedback.target))
                .collect::<Vec<_>>()
                .join(&self.plan.output.separator);
            cells.push(CellValue::Text(joined));
        }
        cells.push(score_cell(result.top()));
        cells.push(CellValue::Number(result.len() as f64));
        cells.push(status_cell(result.status()));
        let diffs = result.matches().next().map_or(&[][..], |(_, diffs)| diffs);
        cells.push(diff_cell(diffs));
    }

    fn exploded_row(
        &self,
        candidate: &MatchCandidate,
        diffs: &[String],
        rank: usize,
        cells: &mut Vec<CellValue>,
    ) {
        for feedback in &self.plan.feedback {
            cells.push(CellValue::Text(
                self.feedback_value(candidate, feedback.target),
            ));
        }
        cells.push(score_cell(Some(candidate)));
        cells.push(CellValue::Number(rank as f64));
        cells.push(status_cell(Status::from_diffs(diffs)));
        cells.push(diff_cell(diffs));
    }

    fn failed_row(&self, cells: &mut Vec<CellValue>) {
        for _ in &self.plan.feedback {
            cells.push(self.absent());
        }
        cells.push(score_cell(None));
        cells.push(CellValue::Missing);
        cells.push(status_cell(Status::Failed));
        cells.push(CellValue::Missing);
    }
}

fn score_cell(candidate: Option<&MatchCandidate>) -> CellValue {
    CellValue::Number(candidate.map_or(0.0, |c| c.score.report_value()))
}

fn status_cell(status: Status) -> CellValue {
    CellValue::Text(status.as_str().to_string())
}

fn diff_cell(diffs: &[String]) -> CellValue {
    if diffs.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(diffs.join(DIFF_SEPARATOR))
    }
}
