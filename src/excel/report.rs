//! Excel run report - one row per worksheet

use crate::error::{DispatchError, DispatchResult};
use crate::types::RunSummary;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

const HEADERS: [&str; 6] = ["#", "Sheet", "Output", "Status", "Exit Code", "Duration (ms)"];

/// Write `summary` as a single-sheet .xlsx workbook
pub fn write_excel_report(output: &Path, summary: &RunSummary) -> DispatchResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Run")
        .map_err(|e| DispatchError::Report(format!("Failed to set worksheet name: {}", e)))?;

    worksheet.set_column_width(0, 5).ok();
    worksheet.set_column_width(1, 24).ok();
    worksheet.set_column_width(2, 48).ok();
    worksheet.set_column_width(3, 20).ok();
    worksheet.set_column_width(4, 10).ok();
    worksheet.set_column_width(5, 14).ok();

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .ok();
    }

    for (i, outcome) in summary.outcomes.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_number(row, 0, (outcome.job.index + 1) as f64)
            .ok();
        worksheet.write_string(row, 1, &outcome.job.sheet).ok();
        worksheet
            .write_string(row, 2, outcome.job.output.display().to_string())
            .ok();
        worksheet.write_string(row, 3, outcome.status.label()).ok();
        if let crate::types::SheetStatus::Failed { code: Some(code) } = outcome.status {
            worksheet.write_number(row, 4, code as f64).ok();
        }
        worksheet
            .write_number(row, 5, outcome.duration_ms as f64)
            .ok();
    }

    let meta_row = (summary.outcomes.len() + 3) as u32;
    let meta = [
        format!("Input: {}", summary.input.display()),
        format!("Version: {}", summary.version),
        format!(
            "Succeeded: {} / Failed: {}",
            summary.succeeded(),
            summary.failed()
        ),
        format!("Run: {} ({})", summary.run_id, summary.started_at.to_rfc3339()),
    ];
    for (offset, line) in meta.iter().enumerate() {
        worksheet
            .write_string(meta_row + offset as u32, 0, line)
            .ok();
    }

    workbook
        .save(output)
        .map_err(|e| DispatchError::Report(format!("Failed to save Excel report: {}", e)))?;

    Ok(())
}
