//! Scoped per-case working directories
//!
//! Each test case gets an exclusively-owned temporary directory: the splitter
//! writes its per-contract outputs there, and the two JSON artifacts of the
//! round trip live there. The directory is removed when the [`Workspace`] is
//! dropped, which covers every exit path including mid-run aborts.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::interfaces::HarnessError;

/// RAII temporary directory bound to one test case's lifetime.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self, HarnessError> {
        let dir = tempfile::Builder::new()
            .prefix("ast-roundtrip-")
            .tempdir()
            .map_err(HarnessError::Io)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directory_exists_while_held() {
        let ws = Workspace::create().unwrap();
        assert!(ws.path().is_dir());
        fs::write(ws.file("expected.json"), "{}").unwrap();
        assert!(ws.file("expected.json").is_file());
    }

    #[test]
    fn directory_removed_on_drop() {
        let path = {
            let ws = Workspace::create().unwrap();
            fs::write(ws.file("obtained.json"), "{}").unwrap();
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn workspaces_never_share_directories() {
        let a = Workspace::create().unwrap();
        let b = Workspace::create().unwrap();
        assert_ne!(a.path(), b.path());
    }
}
