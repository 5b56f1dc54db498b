//! Board export: JSON, CSV and a plain-text table.

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::leaderboard::Board;

/// Serialize a board (scope, rows, fold report) as pretty JSON.
pub fn export_json(board: &Board) -> Result<String> {
    serde_json::to_string_pretty(board).context("Failed to serialize board")
}

/// One CSV row per ranked solver, with a 1-based rank column.
pub fn export_csv(board: &Board) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["rank", "name", "distinct", "defuser", "expert", "efm"])?;
    for (i, e) in board.entries.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            e.name.clone(),
            e.distinct.to_string(),
            e.defuser.to_string(),
            e.expert.to_string(),
            e.efm.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Human-readable table.
pub fn render_table(board: &Board) -> String {
    let name_width = board
        .entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!("Leaderboard ({})\n", board.scope.label()));
    out.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>8}  {:>7}  {:>6}  {:>4}\n",
        "#", "Name", "Distinct", "Defuser", "Expert", "EFM"
    ));
    for (i, e) in board.entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>8}  {:>7}  {:>6}  {:>4}\n",
            i + 1,
            e.name,
            e.distinct,
            e.defuser,
            e.expert,
            e.efm
        ));
    }
    if board.entries.is_empty() {
        out.push_str("  (no solvers)\n");
    }
    if !board.report.rejected.is_empty() {
        out.push_str(&format!(
            "{} completion(s) rejected:\n",
            board.report.rejected.len()
        ));
        for r in &board.report.rejected {
            out.push_str(&format!("  #{}: {}\n", r.completion, r.error));
        }
    }
    out
}

pub fn render(board: &Board, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(board)),
        OutputFormat::Json => export_json(board),
        OutputFormat::Csv => export_csv(board),
    }
}
