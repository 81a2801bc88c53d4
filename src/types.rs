use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

//==============================================================================
// Run Configuration
//==============================================================================

/// Default interpreter for the reclassification tool
pub const DEFAULT_TOOL_PROGRAM: &str = "python3";

/// Default script handed to the interpreter
pub const DEFAULT_TOOL_SCRIPT: &str = "reclassify_tab_v5b.py";

/// External command invoked once per worksheet.
///
/// The dispatcher appends `--input`, `--sheet` and `--output` after `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_PROGRAM).with_args([DEFAULT_TOOL_SCRIPT])
    }
}

/// What to do when two worksheets sanitize to the same output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort before any sheet is processed
    #[default]
    Reject,
    /// Append `-2`, `-3`, ... to the later fragment
    Suffix,
}

/// Everything a run needs, built once at process start
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub version: u32,
    pub tool: ToolCommand,
    /// Forward `--zip` so the tool also archives each output
    pub zip: bool,
    pub collision: CollisionPolicy,
    pub dry_run: bool,
}

impl DispatchConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, version: u32) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            version,
            tool: ToolCommand::default(),
            zip: false,
            collision: CollisionPolicy::default(),
            dry_run: false,
        }
    }
}

//==============================================================================
// Jobs and Outcomes
//==============================================================================

/// One planned tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetJob {
    /// Position in the workbook's sheet order (0-based)
    pub index: usize,
    pub sheet: String,
    pub fragment: String,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetStatus {
    Succeeded,
    /// Non-zero exit; `code` is `None` when the tool was killed by a signal
    Failed { code: Option<i32> },
    /// Exit 0 but the output file never appeared
    MissingOutput,
    LaunchError { message: String },
    /// Dry run, nothing invoked
    Planned,
}

impl SheetStatus {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SheetStatus::Failed { .. } | SheetStatus::MissingOutput | SheetStatus::LaunchError { .. }
        )
    }

    pub fn label(&self) -> String {
        match self {
            SheetStatus::Succeeded => "succeeded".to_string(),
            SheetStatus::Failed { code: Some(code) } => format!("failed (exit {})", code),
            SheetStatus::Failed { code: None } => "failed (terminated)".to_string(),
            SheetStatus::MissingOutput => "missing output".to_string(),
            SheetStatus::LaunchError { message } => format!("launch error: {}", message),
            SheetStatus::Planned => "planned".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetOutcome {
    #[serde(flatten)]
    pub job: SheetJob,
    #[serde(flatten)]
    pub status: SheetStatus,
    pub duration_ms: u64,
}

/// Result of a complete run, suitable for printing or writing as a report
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub version: u32,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<SheetOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == SheetStatus::Succeeded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failure()).count()
    }

    /// True when no sheet failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &SheetOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_failure())
    }
}
