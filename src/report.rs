//! Run reports
//!
//! The format follows the file extension: `.yaml`/`.yml`, `.json` or `.xlsx`.

use crate::error::{DispatchError, DispatchResult};
use crate::excel::write_excel_report;
use crate::types::RunSummary;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Yaml,
    Json,
    Excel,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> DispatchResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ReportFormat::Yaml),
            Some("json") => Ok(ReportFormat::Json),
            Some("xlsx") => Ok(ReportFormat::Excel),
            _ => Err(DispatchError::Report(format!(
                "Unsupported report format for {} (use .yaml, .yml, .json or .xlsx)",
                path.display()
            ))),
        }
    }
}

pub fn write_report(path: &Path, summary: &RunSummary) -> DispatchResult<()> {
    match ReportFormat::from_path(path)? {
        ReportFormat::Yaml => {
            let yaml = serde_yaml::to_string(summary)
                .map_err(|e| DispatchError::Report(format!("Failed to serialize report: {}", e)))?;
            fs::write(path, yaml)?;
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| DispatchError::Report(format!("Failed to serialize report: {}", e)))?;
            fs::write(path, json)?;
        }
        ReportFormat::Excel => write_excel_report(path, summary)?,
    }
    Ok(())
}
