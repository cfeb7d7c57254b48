//! # Check Subcommand Handler
//!
//! Runs one check through `ysv-schema` and turns whatever happens into a
//! [`Report`]: a verdict, a check error, or a contained panic. Nothing here
//! returns early with a fault; every path ends in a report and an exit code.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use ysv_schema::check_files;

use crate::args::Cli;
use crate::report::{Report, Verdict};

/// Execute the check described by `cli`.
pub fn run_check(cli: &Cli) -> Report {
    tracing::debug!(
        values = %cli.values.display(),
        schema = %cli.schema.display(),
        "starting check"
    );
    if !cli.rest.is_empty() {
        tracing::debug!(count = cli.rest.len(), "ignoring extra arguments");
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        check_files(&cli.values, &cli.schema)
    }));

    let verdict = match result {
        Ok(Ok(violations)) if violations.is_empty() => Verdict::Valid,
        Ok(Ok(violations)) => Verdict::Invalid(violations),
        Ok(Err(e)) => Verdict::Failed(e),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%message, "check panicked");
            Verdict::Unexpected(message)
        }
    };

    tracing::info!(
        verdict = verdict.label(),
        errors = verdict.error_count(),
        "check finished"
    );

    Report {
        values: cli.values.clone(),
        schema: cli.schema.clone(),
        verdict,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
