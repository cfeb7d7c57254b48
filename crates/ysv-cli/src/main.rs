//! # ysv CLI entry point
//!
//! Parses arguments, sets up logging, runs the check and maps the report to
//! an exit code.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ysv_cli::{parse_args, run_check, Cli, Invocation};

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(text) => {
            emit(&text);
            return ExitCode::SUCCESS;
        }
        Invocation::Usage(text) => {
            emit(&text);
            return ExitCode::from(1);
        }
    };

    init_tracing(cli.verbose);

    // Panics surface as an unexpected-error verdict; log them on stderr only.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));

    match execute(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            emit(&format!("❌ Unexpected error: {e:#}\n"));
            ExitCode::from(1)
        }
    }
}

/// Write `text` to stdout. A failed write is logged, never a panic, so the
/// exit code stays the one already decided.
fn emit(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
    {
        tracing::warn!(error = %e, "could not write to stdout");
    }
}

fn execute(cli: &Cli) -> Result<u8> {
    let report = run_check(cli);
    let rendered = report.render(cli.format)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("writing report to stdout")?;

    Ok(report.exit_code())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ysv starting");
}
