//! Collaborator seams and error taxonomy
//!
//! This module defines trait-based abstractions for the two external tools
//! the harness drives:
//! - Compiler invocation (probe, AST export, AST reimport)
//! - Source splitting (multi-contract file → standalone inputs)
//!
//! The default implementations spawn the real subprocesses; tests substitute
//! scripted stubs to reach every control-flow branch without a compiler
//! install.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::invoke::{InvocationResult, invoke};
use super::splitter::SplitOutcome;

/// Errors that abort the harness run.
///
/// Per-case conditions (uncompilable input, reimport failure, mismatch,
/// splitter decode error) are *not* errors; they are outcome variants handled
/// exhaustively by the runner. Everything here means either the harness was
/// misconfigured or its own tooling is broken.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Fatal before any test runs: missing binary, unreadable test
    /// directories, unsupported mode.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Fatal mid-run: splitter exit code outside its contract, or a
    /// subprocess that could not be spawned. Distinguishes "our tooling is
    /// broken" from "the input under test is broken".
    #[error("harness defect: {0}")]
    Defect(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Compiler Interface
// ============================================================================

/// Drive the compiler under test as a black box.
///
/// All three operations run with the per-case workspace as working directory
/// and return the raw invocation result; a non-zero exit is data for the
/// verifier's state machine, never an `Err`.
pub trait CompilerDriver {
    /// Compilability probe: binary-output mode, AST output unused.
    fn probe(&self, inputs: &[PathBuf], workdir: &Path) -> Result<InvocationResult, HarnessError>;

    /// Export the combined AST of `inputs` as pretty-printed JSON on stdout.
    fn export_ast(&self, inputs: &[PathBuf], workdir: &Path)
    -> Result<InvocationResult, HarnessError>;

    /// Import a previously exported JSON document as the AST input and
    /// re-export it with the identical formatting configuration.
    fn reimport_export(
        &self,
        ast_json: &Path,
        workdir: &Path,
    ) -> Result<InvocationResult, HarnessError>;
}

// ============================================================================
// Splitter Interface
// ============================================================================

/// Adapt one discovered file into the input set the compiler will receive.
pub trait SourceSplitter {
    /// Run the splitter on `file` with `workdir` as working directory (split
    /// outputs are written there) and decode its exit-code protocol.
    fn split(&self, file: &Path, workdir: &Path) -> Result<SplitOutcome, HarnessError>;
}

// ============================================================================
// Default Compiler Implementation
// ============================================================================

/// Argument template shared by both export invocations. Export and reimport
/// must request the same pretty-printing configuration, or the textual
/// comparison is meaningless.
const EXPORT_ARGS: &[&str] = &["--combined-json", "ast", "--pretty-json", "--json-indent", "4"];

/// Subprocess-backed compiler driver.
pub struct SubprocessCompiler {
    binary: PathBuf,
    /// Forward otherwise-discarded probe output to stderr (`--show-errors`)
    show_errors: bool,
}

impl SubprocessCompiler {
    pub fn new(binary: impl Into<PathBuf>, show_errors: bool) -> Self {
        Self {
            binary: binary.into(),
            show_errors,
        }
    }
}

impl CompilerDriver for SubprocessCompiler {
    fn probe(&self, inputs: &[PathBuf], workdir: &Path) -> Result<InvocationResult, HarnessError> {
        let mut args: Vec<OsString> = vec!["--bin".into()];
        args.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
        let result = invoke(&self.binary, args, workdir)?;
        // The probe's stdout is discarded by default; --show-errors reroutes
        // it to our stderr for interactive debugging.
        if self.show_errors && !result.stdout.is_empty() {
            eprintln!("{}", result.stdout_lossy());
        }
        Ok(result)
    }

    fn export_ast(
        &self,
        inputs: &[PathBuf],
        workdir: &Path,
    ) -> Result<InvocationResult, HarnessError> {
        let mut args: Vec<OsString> = EXPORT_ARGS.iter().map(OsString::from).collect();
        args.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
        invoke(&self.binary, args, workdir)
    }

    fn reimport_export(
        &self,
        ast_json: &Path,
        workdir: &Path,
    ) -> Result<InvocationResult, HarnessError> {
        let mut args: Vec<OsString> = vec![OsString::from("--import-ast")];
        args.extend(EXPORT_ARGS.iter().map(OsString::from));
        args.push(ast_json.as_os_str().to_owned());
        invoke(&self.binary, args, workdir)
    }
}
