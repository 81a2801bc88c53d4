//! The per-worksheet dispatch loop
//!
//! Worksheets are processed one at a time in workbook order. Input-level
//! errors (missing or unreadable workbook, name collisions) abort before the
//! first invocation. A sheet that fails is logged and counted, and the loop
//! moves on to the next sheet.

use crate::error::DispatchResult;
use crate::excel::SheetSource;
use crate::naming::plan_jobs;
use crate::processor::SheetProcessor;
use crate::types::{DispatchConfig, RunSummary, SheetJob, SheetOutcome, SheetStatus};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Binds a configuration to a sheet source and a processor
pub struct Dispatcher<S, P> {
    config: DispatchConfig,
    source: S,
    processor: P,
}

impl<S: SheetSource, P: SheetProcessor> Dispatcher<S, P> {
    pub fn new(config: DispatchConfig, source: S, processor: P) -> Self {
        Self {
            config,
            source,
            processor,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Hand back the processor, e.g. to inspect a fake after a run
    pub fn into_processor(self) -> P {
        self.processor
    }

    /// Enumerate and plan without running anything
    pub fn plan(&self) -> DispatchResult<Vec<SheetJob>> {
        let sheets = self.source.sheet_names(&self.config.input)?;
        plan_jobs(
            &sheets,
            &self.config.output_dir,
            self.config.version,
            self.config.collision,
        )
    }

    pub fn run(&mut self) -> DispatchResult<RunSummary> {
        let started_at = Utc::now();
        let jobs = self.plan()?;
        let total = jobs.len();

        info!(
            input = %self.config.input.display(),
            sheets = total,
            version = self.config.version,
            "dispatching worksheets"
        );

        if !self.config.dry_run {
            fs::create_dir_all(&self.config.output_dir)?;
        }

        let mut outcomes = Vec::with_capacity(total);
        for job in jobs {
            outcomes.push(self.run_job(job, total));
        }

        let summary = RunSummary {
            run_id: Uuid::new_v4(),
            input: self.config.input.clone(),
            output_dir: self.config.output_dir.clone(),
            version: self.config.version,
            dry_run: self.config.dry_run,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        if summary.is_success() {
            info!(succeeded = summary.succeeded(), "run complete");
        } else {
            warn!(
                succeeded = summary.succeeded(),
                failed = summary.failed(),
                "run complete with failures"
            );
        }

        Ok(summary)
    }

    fn run_job(&mut self, job: SheetJob, total: usize) -> SheetOutcome {
        let position = job.index + 1;

        if self.config.dry_run {
            info!(
                sheet = %job.sheet,
                output = %job.output.display(),
                "[{}/{}] would process",
                position,
                total
            );
            return SheetOutcome {
                job,
                status: SheetStatus::Planned,
                duration_ms: 0,
            };
        }

        info!(
            sheet = %job.sheet,
            output = %job.output.display(),
            "[{}/{}] processing",
            position,
            total
        );

        let started = Instant::now();
        let result = clear_stale_output(&job.output).and_then(|_| {
            self.processor
                .process(&self.config.input, &job.sheet, &job.output)
        });
        let duration_ms = started.elapsed().as_millis() as u64;

        let status = match result {
            Ok(exit) if exit.success() => {
                if job.output.exists() {
                    SheetStatus::Succeeded
                } else {
                    SheetStatus::MissingOutput
                }
            }
            Ok(exit) => SheetStatus::Failed { code: exit.code() },
            Err(e) => SheetStatus::LaunchError {
                message: e.to_string(),
            },
        };

        if status.is_failure() {
            error!(
                sheet = %job.sheet,
                duration_ms,
                "[{}/{}] {}",
                position,
                total,
                status.label()
            );
        } else {
            info!(
                sheet = %job.sheet,
                duration_ms,
                "[{}/{}] done",
                position,
                total
            );
        }

        SheetOutcome {
            job,
            status,
            duration_ms,
        }
    }
}

/// Remove an output left over from an earlier run.
///
/// A tool that exits 0 without writing must not be credited with an old file.
fn clear_stale_output(output: &Path) -> DispatchResult<()> {
    match fs::remove_file(output) {
        Ok(()) => {
            debug!(output = %output.display(), "removed stale output");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Run every worksheet of `config.input` through `processor`
pub fn run<S: SheetSource, P: SheetProcessor>(
    config: DispatchConfig,
    source: S,
    processor: P,
) -> DispatchResult<RunSummary> {
    Dispatcher::new(config, source, processor).run()
}
