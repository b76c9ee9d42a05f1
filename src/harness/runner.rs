//! Per-case control flow and final verdict
//!
//! The runner drives discovery, adapts each candidate through the splitter,
//! verifies the resulting test case, and folds outcomes into the run-wide
//! counters. Cases run strictly sequentially: the collaborators share
//! working-directory semantics that are not safe to invoke concurrently, and
//! deterministic failure ordering matters more than throughput here.
//!
//! Only two conditions abort a run mid-flight: a splitter exit code outside
//! its contract, and a subprocess that cannot be spawned. Everything else is
//! recorded and the run moves on.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::config::HarnessConfig;
use super::counters::Counters;
use super::discovery::discover_sources;
use super::interfaces::{CompilerDriver, HarnessError, SourceSplitter, SubprocessCompiler};
use super::splitter::{SplitOutcome, SubprocessSplitter};
use super::verifier::{CaseOutcome, TestCase, verify_case};
use super::workspace::Workspace;

/// Run the full suite against the real subprocess collaborators.
pub fn run_suite(config: &HarnessConfig) -> Result<Counters, HarnessError> {
    // Resolves tool paths to absolute; every subprocess below runs with a
    // per-case workspace as its cwd.
    let config = config.validated()?;
    let files = discover_sources(
        &config.test_dirs,
        &config.source_extension,
        &config.excluded_fixtures,
    )?;
    debug!(candidates = files.len(), "discovery complete");

    let compiler = SubprocessCompiler::new(&config.compiler, config.show_errors);
    let splitter = SubprocessSplitter::new(&config.splitter);
    run_cases(&compiler, &splitter, &files)
}

/// Process every discovered candidate and produce the final tally.
///
/// Generic over the collaborator seams so tests can drive the control flow
/// with scripted stubs.
pub fn run_cases<C, S>(
    compiler: &C,
    splitter: &S,
    files: &[PathBuf],
) -> Result<Counters, HarnessError>
where
    C: CompilerDriver,
    S: SourceSplitter,
{
    let mut counters = Counters {
        total_sources: files.len(),
        ..Counters::default()
    };

    for file in files {
        // Running progress indicator, one dot per case
        eprint!(".");
        let _ = std::io::stderr().flush();

        // The workspace is dropped at the end of each iteration and on every
        // early-return path, so abort paths release it too.
        let workspace = Workspace::create()?;

        let case = match splitter.split(file, workspace.path())? {
            SplitOutcome::Split(parts) => {
                counters.note_split(parts.len());
                TestCase::split(file.clone(), parts)
            }
            SplitOutcome::Unsplittable => TestCase::single(file.clone()),
            SplitOutcome::DecodeError(output) => {
                // Recoverable: the splitter choked on the bytes, but the
                // compiler may still accept the file as-is.
                warn!(file = %file.display(), "splitter reported a decode error; using the file unsplit");
                eprintln!("\n{}", decode_error_notice(&output));
                TestCase::single(file.clone())
            }
            SplitOutcome::Fatal { code, output } => {
                eprintln!(
                    "\nGot unexpected exit code {} from the splitter. Aborting.",
                    code
                );
                eprintln!("{}", output.trim_end());
                return Err(HarnessError::Defect(format!(
                    "splitter exited with code {} outside its 0/1/2 contract",
                    code
                )));
            }
        };

        let outcome = verify_case(compiler, &case, &workspace)?;
        report_case(&case, &outcome);
        counters.record(&outcome);
    }

    eprintln!();
    Ok(counters)
}

/// User-facing notice for the recoverable splitter decode error.
fn decode_error_notice(output: &str) -> String {
    format!("splitter decode error: {}", output.trim_end())
}

/// Detailed diagnostics, failing cases only.
fn report_case(case: &TestCase, outcome: &CaseOutcome) {
    match outcome {
        CaseOutcome::Passed | CaseOutcome::Uncompilable => {}
        CaseOutcome::ImportFailed { stdout, stderr } => {
            eprintln!(
                "\n\x1b[31mERROR: AST reimport failed for input file {}.\x1b[0m",
                case.primary_file.display()
            );
            eprintln!("stdout:\n{}", stdout);
            eprintln!("stderr:\n{}", stderr);
        }
        CaseOutcome::Mismatched { diff } => {
            eprintln!(
                "\n\x1b[31mERROR: AST reimport/export differs for input file {}.\x1b[0m",
                case.primary_file.display()
            );
            eprintln!("{}", diff);
        }
    }
}
