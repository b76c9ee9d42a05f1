//! Black-box subprocess invocation
//!
//! All three external collaborators (compiler, splitter, diff) are driven
//! through [`invoke`]. A non-zero exit status is valid data for the caller to
//! inspect; only a failure to spawn the process at all is an error, and that
//! error is fatal to the whole run.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use super::interfaces::HarnessError;

/// Captured result of one collaborator invocation.
///
/// Owned exclusively by the caller that requested it; never shared across
/// test cases.
#[derive(Debug)]
pub struct InvocationResult {
    /// Exit code, or `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl InvocationResult {
    /// True iff the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Both streams joined, for diagnostics that want everything the tool said.
    pub fn combined_lossy(&self) -> String {
        let out = self.stdout_lossy();
        let err = self.stderr_lossy();
        if err.trim().is_empty() {
            out
        } else if out.trim().is_empty() {
            err
        } else {
            format!("{}\n{}", out, err)
        }
    }
}

/// Run `binary` with `args` inside `workdir`, capturing both streams.
///
/// stdin is closed; the collaborators are non-interactive. A spawn failure
/// (binary missing, not executable) is a [`HarnessError::Defect`]: the
/// harness cannot meaningfully continue without its tooling.
pub fn invoke<I, S>(binary: &Path, args: I, workdir: &Path) -> Result<InvocationResult, HarnessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(binary)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            HarnessError::Defect(format!("failed to spawn '{}': {}", binary.display(), e))
        })?;

    Ok(InvocationResult {
        code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
