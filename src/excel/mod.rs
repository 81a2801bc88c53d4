//! Workbook access
//!
//! - Reading: worksheet names via calamine
//! - Writing: the .xlsx flavour of the run report

mod report;
mod sheets;

pub use report::write_excel_report;
pub use sheets::{list_worksheet_names, CalamineSource, SheetSource};
