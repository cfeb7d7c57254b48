//! # Arguments
//!
//! `ysv [OPTIONS] <VALUES> <SCHEMA>`. Positionals after the first two are
//! accepted and ignored. Other argument errors (too few positionals, unknown
//! flags) are usage errors: they are reported on stdout and exit 1, and no
//! file is touched.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};

/// One-line usage, printed ahead of clap's diagnostic on usage errors.
pub const USAGE: &str = "Usage: ysv [OPTIONS] <values.yaml> <schema.json>";

/// Validate a YAML values file against a JSON Schema (Draft 7).
///
/// Prints every violation with its location and the schema rule that failed.
/// Exits 0 when the document is valid and 1 otherwise.
#[derive(Parser, Debug, Clone)]
#[command(name = "ysv", version, about, long_about = None)]
pub struct Cli {
    /// YAML document to validate.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// JSON Schema (Draft 7) to validate against.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Trailing positionals, ignored.
    #[arg(hide = true)]
    pub rest: Vec<OsString>,

    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// What the command line asks for.
#[derive(Debug)]
pub enum Invocation {
    /// Run a check.
    Run(Cli),
    /// `--help` or `--version`: print and exit 0.
    Info(String),
    /// Arguments did not parse: print and exit 1.
    Usage(String),
}

/// Parse `args` (including the program name) without exiting the process.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Invocation::Info(e.render().to_string())
            }
            _ => Invocation::Usage(format!("{USAGE}\n\n{}", e.render())),
        },
    }
}
