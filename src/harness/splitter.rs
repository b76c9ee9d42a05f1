//! Splitter tool outcome decoding
//!
//! The external splitter turns a combined multi-contract source file into
//! standalone per-contract files, communicating through its exit code:
//!
//! - `0` - split succeeded; stdout carries a whitespace-separated list of
//!   generated file paths
//! - `1` - the input is already a single self-contained unit
//! - `2` - a decode error occurred (e.g. an invalid byte sequence); the
//!   harness logs the tool's diagnostics and degrades to the original file
//! - anything else - the tooling itself is broken; the whole run aborts
//!
//! The exit-code convention is decoded into [`SplitOutcome`] exactly once, at
//! this boundary, so the runner handles all four cases exhaustively instead
//! of threading raw exit codes through its control flow.

use std::path::{Path, PathBuf};

use super::interfaces::{HarnessError, SourceSplitter};
use super::invoke::{InvocationResult, invoke};

/// Decoded splitter result for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Clean multi-file split; feed these files to the compiler instead of
    /// the original.
    Split(Vec<PathBuf>),
    /// Already atomic; use the original file unchanged.
    Unsplittable,
    /// Malformed byte content; recoverable. Carries the tool's diagnostics.
    DecodeError(String),
    /// Exit code outside the tool's contract; unrecoverable harness defect.
    Fatal { code: i32, output: String },
}

/// Decode an invocation result per the splitter's exit-code contract.
///
/// Relative paths printed by the tool are resolved against `workdir`, where
/// the split outputs were written.
pub fn interpret(result: &InvocationResult, workdir: &Path) -> SplitOutcome {
    match result.code {
        Some(0) => {
            let files: Vec<PathBuf> = result
                .stdout_lossy()
                .split_whitespace()
                .map(|name| workdir.join(name))
                .collect();
            if files.is_empty() {
                // A successful split that produced nothing to compile; treat
                // the original as atomic rather than building an empty case.
                SplitOutcome::Unsplittable
            } else {
                SplitOutcome::Split(files)
            }
        }
        Some(1) => SplitOutcome::Unsplittable,
        Some(2) => SplitOutcome::DecodeError(result.combined_lossy()),
        code => SplitOutcome::Fatal {
            code: code.unwrap_or(-1),
            output: result.combined_lossy(),
        },
    }
}

/// Subprocess-backed splitter adapter.
pub struct SubprocessSplitter {
    tool: PathBuf,
}

impl SubprocessSplitter {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }
}

impl SourceSplitter for SubprocessSplitter {
    fn split(&self, file: &Path, workdir: &Path) -> Result<SplitOutcome, HarnessError> {
        let result = invoke(&self.tool, [file.as_os_str()], workdir)?;
        Ok(interpret(&result, workdir))
    }
}
