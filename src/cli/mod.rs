//! CLI for the round-trip harness
//!
//! ## Usage
//!
//! - `ast-roundtrip ast` - run the AST round-trip suite
//! - `ast-roundtrip ast --show-errors` - forward the compiler's suppressed
//!   stdout to stderr for interactive debugging
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::harness::config::HarnessConfig;
use crate::harness::runner::run_suite;

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
    /// Create a new CLI error with a message and exit code.
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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Round-trip equivalence harness for the compiler's AST serializer
#[derive(Parser, Debug)]
#[command(name = "ast-roundtrip")]
#[command(version = VERSION)]
#[command(about = "Round-trip equivalence harness for the compiler's AST serializer", long_about = None)]
pub struct Cli {
    /// Test mode to run; `ast` is the only supported mode
    #[arg(value_name = "MODE")]
    pub mode: String,

    /// Forward the compiler's suppressed stdout to stderr
    #[arg(long = "show-errors")]
    pub show_errors: bool,

    /// Directory to scan for test sources (repeatable; overrides defaults)
    #[arg(long = "test-dir", value_name = "DIR")]
    pub test_dirs: Vec<PathBuf>,

    /// Compiler binary (overrides the build-directory default)
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<PathBuf>,

    /// Source splitter tool (overrides the default)
    #[arg(long, value_name = "PATH")]
    pub splitter: Option<PathBuf>,
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

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.mode != "ast" {
        return Err(CliError::failure(format!(
            "Unsupported test mode '{}'; the only supported mode is 'ast'",
            cli.mode
        )));
    }

    let mut config = HarnessConfig::from_environment();
    config.show_errors = cli.show_errors;
    if !cli.test_dirs.is_empty() {
        config.test_dirs = cli.test_dirs;
    }
    if let Some(compiler) = cli.compiler {
        config.compiler = compiler;
    }
    if let Some(splitter) = cli.splitter {
        config.splitter = splitter;
    }

    let counters = run_suite(&config).map_err(|e| CliError::failure(e.to_string()))?;

    if counters.is_success() {
        println!("{}", counters.summary());
        Ok(ExitCode::SUCCESS)
    } else {
        // Same summary, as an error, with a non-zero exit for CI gating
        Err(CliError::failure(counters.summary()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_ast_mode() {
        let cli = Cli::try_parse_from(["ast-roundtrip", "ast"]).unwrap();
        assert_eq!(cli.mode, "ast");
        assert!(!cli.show_errors);
    }

    #[test]
    fn test_cli_parse_show_errors() {
        let cli = Cli::try_parse_from(["ast-roundtrip", "ast", "--show-errors"]).unwrap();
        assert!(cli.show_errors);
    }

    #[test]
    fn test_cli_parse_repeatable_test_dirs() {
        let cli = Cli::try_parse_from([
            "ast-roundtrip",
            "ast",
            "--test-dir",
            "fixtures/a",
            "--test-dir",
            "fixtures/b",
        ])
        .unwrap();
        assert_eq!(cli.test_dirs.len(), 2);
    }

    #[test]
    fn test_cli_parse_tool_overrides() {
        let cli = Cli::try_parse_from([
            "ast-roundtrip",
            "ast",
            "--compiler",
            "build/solc/solc",
            "--splitter",
            "scripts/splitSources.py",
        ])
        .unwrap();
        assert!(cli.compiler.is_some());
        assert!(cli.splitter.is_some());
    }

    #[test]
    fn test_cli_requires_a_mode() {
        assert!(Cli::try_parse_from(["ast-roundtrip"]).is_err());
    }

    #[test]
    fn test_unsupported_mode_is_a_usage_error() {
        let cli = Cli::try_parse_from(["ast-roundtrip", "bytecode"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("bytecode"));
    }
}
