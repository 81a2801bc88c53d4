//! Per-sheet processing capability
//!
//! The dispatcher only knows [`SheetProcessor`]. [`ToolProcessor`] runs the
//! external reclassification tool as a subprocess; tests plug in fakes.

use crate::error::{DispatchError, DispatchResult};
use crate::types::ToolCommand;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// How a sheet's processing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
}

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Terminated without an exit code (e.g. killed by a signal)
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

pub trait SheetProcessor {
    /// Process one worksheet, blocking until done.
    ///
    /// `Err` means the processor could not even start; a run that started and
    /// failed is an `Ok` with a non-success status.
    fn process(&mut self, input: &Path, sheet: &str, output: &Path) -> DispatchResult<ExitStatus>;
}

/// Runs `<program> <args..> --input <in> --sheet <name> --output <out> [--zip]`
#[derive(Debug, Clone)]
pub struct ToolProcessor {
    tool: ToolCommand,
    zip: bool,
}

impl ToolProcessor {
    pub fn new(tool: ToolCommand) -> Self {
        Self { tool, zip: false }
    }

    /// Also ask the tool to archive each output as .zip
    pub fn with_zip(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    /// Full argument list passed after the program name
    pub fn arguments(&self, input: &Path, sheet: &str, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.tool.args.iter().map(OsString::from).collect();
        args.push("--input".into());
        args.push(input.as_os_str().to_owned());
        args.push("--sheet".into());
        args.push(sheet.into());
        args.push("--output".into());
        args.push(output.as_os_str().to_owned());
        if self.zip {
            args.push("--zip".into());
        }
        args
    }
}

impl SheetProcessor for ToolProcessor {
    fn process(&mut self, input: &Path, sheet: &str, output: &Path) -> DispatchResult<ExitStatus> {
        let args = self.arguments(input, sheet, output);
        debug!(program = %self.tool.program, ?args, "spawning reclassification tool");

        let status = Command::new(&self.tool.program)
            .args(&args)
            .status()
            .map_err(|source| DispatchError::Launch {
                program: self.tool.program.clone(),
                source,
            })?;

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_exit_status() {
        assert!(ExitStatus::SUCCESS.success());
        assert!(!ExitStatus::from_code(1).success());
        assert_eq!(ExitStatus::from_code(4).code(), Some(4));
        assert!(!ExitStatus::terminated().success());
        assert_eq!(ExitStatus::terminated().code(), None);
    }

    #[test]
    fn test_default_tool_arguments() {
        let processor = ToolProcessor::new(ToolCommand::default());
        let args = processor.arguments(
            Path::new("Inventory.xlsx"),
            "Engine Room",
            Path::new("out/Inventory_out_EngineRoom_3.xlsx"),
        );
        assert_eq!(
            strings(args),
            vec![
                "reclassify_tab_v5b.py",
                "--input",
                "Inventory.xlsx",
                "--sheet",
                "Engine Room",
                "--output",
                "out/Inventory_out_EngineRoom_3.xlsx",
            ]
        );
    }

    #[test]
    fn test_zip_flag_is_forwarded_last() {
        let processor = ToolProcessor::new(ToolCommand::new("reclassify")).with_zip(true);
        let args = strings(processor.arguments(Path::new("a.xlsx"), "S", Path::new("b.xlsx")));
        assert_eq!(args.first().map(String::as_str), Some("--input"));
        assert_eq!(args.last().map(String::as_str), Some("--zip"));
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let mut processor = ToolProcessor::new(ToolCommand::new("definitely-not-a-real-tool-4242"));
        let result = processor.process(Path::new("a.xlsx"), "S", Path::new("b.xlsx"));
        assert!(matches!(result, Err(DispatchError::Launch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_reported() {
        let mut processor = ToolProcessor::new(ToolCommand::new("sh").with_args(["-c", "exit 3", "sh"]));
        let status = processor
            .process(Path::new("a.xlsx"), "S", Path::new("b.xlsx"))
            .unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_tool() {
        let mut processor = ToolProcessor::new(ToolCommand::new("true"));
        let status = processor
            .process(Path::new("a.xlsx"), "S", Path::new("b.xlsx"))
            .unwrap();
        assert!(status.success());
    }
}
