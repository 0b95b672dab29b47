//! User-facing run report
//!
//! Valid documents get one success line as soon as they are reached. Failure
//! blocks are held back and printed after every document has been reported.
//! A document that could not be read ends the report with an error.

use crate::batch::BatchResults;
use crate::pipeline::DocumentOutcome;
use std::io::{self, Write};

/// Process exit status for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    AllValid,
    Failed,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::AllValid => 0,
            RunStatus::Failed => 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Leave out success lines
    pub quiet: bool,
}

pub fn success_line(outcome: &DocumentOutcome) -> String {
    format!("Config file {} validation succeeded.", outcome.path.display())
}

pub fn failure_block(outcome: &DocumentOutcome) -> String {
    format!(
        "Config file '{}' validation failed.\nIssues:\n- {}",
        outcome.path.display(),
        outcome.messages().join("\n- ")
    )
}

/// Write the report: document lines to `out`, a read failure to `err`
pub fn write_report<O: Write, E: Write>(
    results: &BatchResults,
    options: &ReportOptions,
    out: &mut O,
    err: &mut E,
) -> io::Result<RunStatus> {
    let mut failures = Vec::new();

    for outcome in &results.outcomes {
        if outcome.is_valid() {
            if !options.quiet {
                writeln!(out, "{}", success_line(outcome))?;
            }
        } else {
            failures.push(failure_block(outcome));
        }
    }

    for block in &failures {
        writeln!(out, "{}", block)?;
    }

    if let Some(fatal) = &results.fatal {
        writeln!(err, "{}", fatal.error)?;
    }

    Ok(if results.has_failures() {
        RunStatus::Failed
    } else {
        RunStatus::AllValid
    })
}
