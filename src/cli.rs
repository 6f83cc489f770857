//! CLI for the goldrun harness
//!
//! A single invocation mode: point goldrun at a fixture directory and the
//! cargo project of the executable under test. Exit codes are the machine
//! interface: `0` = build succeeded and all fixtures passed, `1` = build
//! failed or at least one fixture mismatched.
//!
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors and
//! exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use crate::harness::interfaces::{CargoBuilder, ProcessExecutor};
use crate::harness::reporter::ConsoleReporter;
use crate::harness::Harness;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file regression harness for compiled executables
#[derive(Parser, Debug)]
#[command(name = "goldrun")]
#[command(version = VERSION)]
#[command(about = "Golden-file regression harness for compiled executables", long_about = None)]
pub struct Cli {
    /// Directory containing `<name>.o` fixtures and `<name>.expected` golden files
    #[arg(value_name = "DIR", default_value = ".")]
    pub fixture_dir: PathBuf,

    /// Cargo project of the executable under test
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Binary name (default: the project directory name)
    #[arg(long, value_name = "NAME")]
    pub bin: Option<String>,

    /// Per-fixture time limit in seconds (no limit when absent)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the harness run and map the verdict to an exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let bin_name = resolve_bin_name(&cli)?;

    let builder = CargoBuilder::new(&cli.project, &bin_name);
    let harness = Harness::new(builder, ProcessExecutor)
        .with_timeout(cli.timeout.map(Duration::from_secs));

    let mut reporter = ConsoleReporter;
    let report = harness
        .run(&cli.fixture_dir, &mut reporter)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    Ok(ExitCode(report.verdict.exit_code()))
}

/// Binary name: `--bin` if given, otherwise the project directory name.
fn resolve_bin_name(cli: &Cli) -> CliResult<String> {
    if let Some(name) = &cli.bin {
        return Ok(name.clone());
    }
    let resolved = cli.project.canonicalize().map_err(|e| {
        CliError::failure(format!(
            "Error: cannot resolve project directory '{}': {}",
            cli.project.display(),
            e
        ))
    })?;
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::failure("Error: cannot derive binary name from project directory; pass --bin")
        })
}

// ============================================================================
// Tests
// ============================================================================
