//! Harness configuration
//!
//! Paths to the two external tools and the fixture directories, with an
//! environment override for the build output directory containing the
//! compiler binary. CLI flags refine the defaults; see `cli`.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::discovery::EXCLUDED_FIXTURES;
use super::interfaces::HarnessError;

/// Selects the build output directory containing the compiler binary.
pub const BUILD_DIR_ENV: &str = "AST_ROUNDTRIP_BUILD_DIR";

const DEFAULT_BUILD_DIR: &str = "build";
const DEFAULT_SPLITTER: &str = "scripts/splitSources.py";
const DEFAULT_TEST_DIRS: &[&str] = &["test/syntaxTests", "test/ASTJSON"];

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Compiler binary under test
    pub compiler: PathBuf,
    /// External source splitter tool
    pub splitter: PathBuf,
    /// Roots to scan for test sources
    pub test_dirs: Vec<PathBuf>,
    /// Recognized source extension (without the dot)
    pub source_extension: String,
    /// Path substrings that disqualify a candidate
    pub excluded_fixtures: Vec<String>,
    /// Forward the compiler's suppressed stdout to stderr
    pub show_errors: bool,
}

impl HarnessConfig {
    /// Defaults, honoring the build-directory environment override.
    pub fn from_environment() -> Self {
        let build_dir = env::var_os(BUILD_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
        Self {
            compiler: build_dir.join("solc").join("solc"),
            splitter: PathBuf::from(DEFAULT_SPLITTER),
            test_dirs: DEFAULT_TEST_DIRS.iter().map(PathBuf::from).collect(),
            source_extension: "sol".to_string(),
            excluded_fixtures: EXCLUDED_FIXTURES.iter().map(|s| s.to_string()).collect(),
            show_errors: false,
        }
    }

    /// Pre-run checks that must hold before any test executes.
    ///
    /// Returns a copy with both tool paths resolved to absolute: subprocesses
    /// run with a per-case workspace as their working directory, so a
    /// relative path that resolves now would stop resolving once the first
    /// case starts. Missing tools are a configuration error here, before any
    /// test runs, not a mid-run defect.
    pub fn validated(&self) -> Result<HarnessConfig, HarnessError> {
        let compiler = fs::canonicalize(&self.compiler).map_err(|_| {
            HarnessError::Configuration(format!(
                "compiler binary not found at '{}' (set {} to the build output directory)",
                self.compiler.display(),
                BUILD_DIR_ENV
            ))
        })?;
        if !compiler.is_file() {
            return Err(HarnessError::Configuration(format!(
                "compiler path '{}' is not a regular file",
                compiler.display()
            )));
        }
        let splitter = fs::canonicalize(&self.splitter).map_err(|_| {
            HarnessError::Configuration(format!(
                "splitter tool not found at '{}'",
                self.splitter.display()
            ))
        })?;
        Ok(HarnessConfig {
            compiler,
            splitter,
            ..self.clone()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_point_into_the_build_tree() {
        let config = HarnessConfig::from_environment();
        assert!(config.compiler.ends_with("solc/solc") || config.compiler.ends_with("solc"));
        assert_eq!(config.source_extension, "sol");
        assert!(!config.test_dirs.is_empty());
        assert!(
            config
                .excluded_fixtures
                .iter()
                .any(|f| f == "boost_filesystem_bug")
        );
    }

    #[test]
    fn missing_compiler_fails_validation() {
        let config = HarnessConfig {
            compiler: PathBuf::from("/nonexistent/build/solc/solc"),
            ..HarnessConfig::from_environment()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, HarnessError::Configuration(_)));
        assert!(err.to_string().contains(BUILD_DIR_ENV));
    }

    #[test]
    fn missing_splitter_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("solc");
        fs::write(&binary, "#!/bin/sh\n").unwrap();
        let config = HarnessConfig {
            compiler: binary,
            splitter: PathBuf::from("/nonexistent/scripts/splitSources.py"),
            ..HarnessConfig::from_environment()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, HarnessError::Configuration(_)));
        assert!(err.to_string().contains("splitter"));
    }

    #[test]
    fn present_tools_pass_validation() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("solc");
        fs::write(&binary, "#!/bin/sh\n").unwrap();
        let splitter = dir.path().join("splitter.py");
        fs::write(&splitter, "").unwrap();
        let config = HarnessConfig {
            compiler: binary,
            splitter,
            ..HarnessConfig::from_environment()
        };
        config.validated().unwrap();
    }

    #[test]
    fn relative_tool_paths_resolve_to_absolute() {
        // cargo runs tests with the crate root as cwd, so target/ is a
        // usable anchor for a genuinely relative path.
        let base = PathBuf::from("target").join(format!("config-rel-{}", std::process::id()));
        fs::create_dir_all(&base).unwrap();
        let compiler = base.join("solc");
        fs::write(&compiler, "#!/bin/sh\n").unwrap();
        let splitter = base.join("splitter.py");
        fs::write(&splitter, "").unwrap();

        let config = HarnessConfig {
            compiler,
            splitter,
            ..HarnessConfig::from_environment()
        };
        let resolved = config.validated().unwrap();
        assert!(resolved.compiler.is_absolute());
        assert!(resolved.splitter.is_absolute());

        fs::remove_dir_all(&base).unwrap();
    }
}
