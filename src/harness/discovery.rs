//! Test source enumeration
//!
//! Pure recursive enumeration of candidate source files under the configured
//! root directories. The result is sorted so a failing run reproduces with
//! the same case ordering. A fixed exclusion list keeps known-pathological
//! fixtures (intentionally malformed paths) away from the splitter and the
//! compiler.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::interfaces::HarnessError;

/// Fixtures that must never become test cases. Currently one: a fixture
/// whose file name deliberately exercises invalid-path handling elsewhere
/// and breaks any tool that touches it.
pub const EXCLUDED_FIXTURES: &[&str] = &["boost_filesystem_bug"];

/// Enumerate candidate source files under `roots`.
///
/// Only files with `extension` are candidates; any path containing one of
/// `exclusions` as a substring is skipped. Roots are canonicalized first, so
/// every discovered path is absolute and stays valid when the compiler later
/// runs with a per-case workspace as its working directory. If not a single
/// root is readable the harness is misconfigured and the run aborts before
/// testing anything.
pub fn discover_sources(
    roots: &[PathBuf],
    extension: &str,
    exclusions: &[String],
) -> Result<Vec<PathBuf>, HarnessError> {
    let mut files = Vec::new();
    let mut readable_roots = 0usize;

    for root in roots {
        let Ok(root) = fs::canonicalize(root) else {
            debug!(root = %root.display(), "skipping unreadable test directory");
            continue;
        };
        if !root.is_dir() {
            debug!(root = %root.display(), "skipping non-directory test root");
            continue;
        }
        readable_roots += 1;
        collect(&root, extension, exclusions, &mut files);
    }

    if readable_roots == 0 {
        return Err(HarnessError::Configuration(format!(
            "none of the test directories are readable: {}",
            roots
                .iter()
                .map(|r| r.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    files.sort();
    Ok(files)
}

fn collect(dir: &Path, extension: &str, exclusions: &[String], files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if path.is_dir() {
            if !name.starts_with('.') {
                collect(&path, extension, exclusions, files);
            }
        } else if path.extension().and_then(|e| e.to_str()) == Some(extension)
            && !is_excluded(&path, exclusions)
        {
            files.push(path);
        }
    }
}

fn is_excluded(path: &Path, exclusions: &[String]) -> bool {
    let text = path.to_string_lossy();
    exclusions.iter().any(|pat| text.contains(pat.as_str()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn exclusions() -> Vec<String> {
        EXCLUDED_FIXTURES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_sources_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.sol"), "").unwrap();
        fs::write(dir.path().join("a.sol"), "").unwrap();
        fs::write(dir.path().join("nested/c.sol"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();

        let base = dir.path().canonicalize().unwrap();
        let found =
            discover_sources(&[dir.path().to_path_buf()], "sol", &exclusions()).unwrap();
        assert_eq!(
            found,
            vec![
                base.join("a.sol"),
                base.join("b.sol"),
                base.join("nested/c.sol"),
            ]
        );
    }

    #[test]
    fn pathological_fixture_is_never_discovered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fine.sol"), "").unwrap();
        fs::write(dir.path().join("boost_filesystem_bug.sol"), "").unwrap();

        let base = dir.path().canonicalize().unwrap();
        let found =
            discover_sources(&[dir.path().to_path_buf()], "sol", &exclusions()).unwrap();
        assert_eq!(found, vec![base.join("fine.sol")]);
    }

    #[test]
    fn relative_roots_yield_absolute_paths() {
        // cargo runs tests with the crate root as cwd, so target/ anchors a
        // genuinely relative root. Discovered paths must be absolute or the
        // compiler cannot resolve them from a per-case workspace cwd.
        let base = PathBuf::from("target").join(format!("discovery-rel-{}", std::process::id()));
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("rel.sol"), "").unwrap();

        let found = discover_sources(&[base.clone()], "sol", &exclusions()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|p| p.is_absolute()));

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn no_readable_roots_is_a_configuration_error() {
        let err = discover_sources(
            &[PathBuf::from("/nonexistent/tests-a"), PathBuf::from("/nonexistent/tests-b")],
            "sol",
            &exclusions(),
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Configuration(_)));
    }

    #[test]
    fn one_readable_root_is_enough() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.sol"), "").unwrap();
        let found = discover_sources(
            &[PathBuf::from("/nonexistent/tests"), dir.path().to_path_buf()],
            "sol",
            &exclusions(),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn discovery_is_stable_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.sol", "m.sol", "a.sol"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let roots = [dir.path().to_path_buf()];
        let first = discover_sources(&roots, "sol", &exclusions()).unwrap();
        let second = discover_sources(&roots, "sol", &exclusions()).unwrap();
        assert_eq!(first, second);
    }
}
