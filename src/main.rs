use clap::{Parser, ValueEnum};
use colored::Colorize;
use inventory_reclass::cli;
use inventory_reclass::types::{
    CollisionPolicy, DispatchConfig, ToolCommand, DEFAULT_TOOL_PROGRAM, DEFAULT_TOOL_SCRIPT,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OnCollision {
    /// Abort before processing anything
    Reject,
    /// Append -2, -3, ... to later sheets
    Suffix,
}

impl From<OnCollision> for CollisionPolicy {
    fn from(value: OnCollision) -> Self {
        match value {
            OnCollision::Reject => CollisionPolicy::Reject,
            OnCollision::Suffix => CollisionPolicy::Suffix,
        }
    }
}

#[derive(Parser)]
#[command(name = "inventory-reclass")]
#[command(about = "Reclassify every worksheet of an inventory workbook")]
#[command(long_about = "Inventory Reclass - run the reclassification tool once per worksheet

For each worksheet of the input workbook, in workbook order, runs:

  <tool> <tool-args..> --input <INPUT> --sheet <SHEET> --output <OUT>

where OUT is <OUTPUT_DIR>/Inventory_out_<SHEET without whitespace>_<VERSION>.xlsx

A failing sheet is reported and the run continues with the next one.
The exit code is non-zero if any sheet failed.

TOOL:
  By default the tool is 'python3 reclassify_tab_v5b.py'.
  --tool replaces the program; --tool-arg supplies its leading arguments
  (without --tool they are handed to python3 instead of the default script).

NAME COLLISIONS:
  'Jan 2024' and 'Jan2024' both map to Inventory_out_Jan2024_<V>.xlsx.
  Names that differ only in letter case also count as the same file.
  By default the run is rejected; --on-collision suffix writes
  Inventory_out_Jan2024-2_<V>.xlsx for the later sheet.

EXAMPLES:
  inventory-reclass -i Inventory.xlsx --version 3
  inventory-reclass -i Inventory.xlsx -o out --version 3 --zip
  inventory-reclass -i Inventory.xlsx --version 3 --dry-run
  inventory-reclass -i Inventory.xlsx --version 3 --report run.yaml
  inventory-reclass -i Inventory.xlsx --version 3 --tool ./reclassify --tool-arg=--fast")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Workbook to process
    #[arg(short, long, env = "RECLASS_INPUT")]
    input: PathBuf,

    /// Directory for the per-sheet output workbooks
    #[arg(short, long, env = "RECLASS_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Version marker embedded in every output file name
    #[arg(long = "version", env = "RECLASS_VERSION")]
    run_version: u32,

    /// Reclassification tool executable
    #[arg(long, env = "RECLASS_TOOL")]
    tool: Option<String>,

    /// Leading argument for the tool (repeatable)
    #[arg(long = "tool-arg", allow_hyphen_values = true)]
    tool_args: Vec<String>,

    /// Ask the tool to also write a .zip of each output
    #[arg(long)]
    zip: bool,

    /// What to do when two sheets map to the same output file
    #[arg(long, value_enum, default_value = "reject")]
    on_collision: OnCollision,

    /// List the planned invocations without running the tool
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Write a run report (.yaml, .yml, .json or .xlsx)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'V', action = clap::ArgAction::Version)]
    print_version: Option<bool>,
}

impl Cli {
    fn tool_command(&self) -> ToolCommand {
        match (&self.tool, self.tool_args.is_empty()) {
            (None, true) => ToolCommand::default(),
            (None, false) => ToolCommand::new(DEFAULT_TOOL_PROGRAM).with_args(self.tool_args.clone()),
            (Some(program), _) => ToolCommand::new(program.clone()).with_args(self.tool_args.clone()),
        }
    }

    fn into_config(self) -> (DispatchConfig, Option<PathBuf>) {
        let tool = self.tool_command();
        let config = DispatchConfig {
            input: self.input,
            output_dir: self.output_dir,
            version: self.run_version,
            tool,
            zip: self.zip,
            collision: self.on_collision.into(),
            dry_run: self.dry_run,
        };
        (config, self.report)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "inventory_reclass=debug"
    } else {
        "inventory_reclass=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    // Mention the default script so a missing file is easy to diagnose
    if args.tool.is_none() && args.tool_args.is_empty() {
        tracing::debug!(script = DEFAULT_TOOL_SCRIPT, "using default reclassification tool");
    }

    let (config, report) = args.into_config();
    match cli::dispatch(config, report) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            let err = anyhow::Error::new(e).context("run aborted");
            eprintln!("{} {:#}", "❌".red(), err);
            ExitCode::FAILURE
        }
    }
}
