//! Inventory Reclass - run the reclassification tool over every worksheet
//!
//! Enumerates the worksheets of an inventory workbook and invokes the external
//! per-sheet reclassification tool once per worksheet, in workbook order,
//! writing `Inventory_out_<sheet>_<version>.xlsx` for each.
//!
//! # Features
//!
//! - Worksheet listing for xlsx, xlsm, xlsb, xls and ods workbooks
//! - Whitespace-free output names with collision detection
//! - Keep-going dispatch: one failing sheet never stops the rest
//! - Run reports as YAML, JSON or Excel
//!
//! # Example
//!
//! ```no_run
//! use inventory_reclass::dispatcher;
//! use inventory_reclass::excel::CalamineSource;
//! use inventory_reclass::processor::ToolProcessor;
//! use inventory_reclass::types::{DispatchConfig, ToolCommand};
//!
//! let config = DispatchConfig::new("Inventory.xlsx", "out", 3);
//! let processor = ToolProcessor::new(ToolCommand::default());
//! let summary = dispatcher::run(config, CalamineSource, processor)?;
//!
//! println!("{} of {} sheets succeeded", summary.succeeded(), summary.outcomes.len());
//! # Ok::<(), inventory_reclass::error::DispatchError>(())
//! ```

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod excel;
pub mod naming;
pub mod processor;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{DispatchError, DispatchResult};
pub use types::{CollisionPolicy, DispatchConfig, RunSummary, SheetJob, SheetStatus, ToolCommand};
