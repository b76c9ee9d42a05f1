//! Run-wide outcome tally
//!
//! One `Counters` value is threaded through the runner for the lifetime of a
//! run; it is the only shared mutable state. Invariants:
//!
//! - `tested == failed + passed comparisons`
//! - uncompilable cases are never counted as tested
//! - `total_sources` is a best-effort diagnostic figure, not a verified
//!   invariant (split fallbacks can skew it)

use super::verifier::CaseOutcome;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Cases that reached the comparison stage (pass or fail)
    pub tested: usize,
    /// Cases whose reimport errored or whose exports differed
    pub failed: usize,
    /// Cases rejected by the compilability probe
    pub uncompilable: usize,
    /// Logical source count across the corpus, adjusted as splits replace
    /// one file with several
    pub total_sources: usize,
}

impl Counters {
    /// Fold one terminal case outcome into the tally.
    pub fn record(&mut self, outcome: &CaseOutcome) {
        match outcome {
            CaseOutcome::Passed => {
                self.tested += 1;
            }
            CaseOutcome::Uncompilable => {
                self.uncompilable += 1;
            }
            CaseOutcome::ImportFailed { .. } | CaseOutcome::Mismatched { .. } => {
                self.tested += 1;
                self.failed += 1;
            }
        }
    }

    /// A split replaced 1 logical source with `produced` files.
    pub fn note_split(&mut self, produced: usize) {
        self.total_sources = self.total_sources + produced - 1;
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// One-line run summary.
    pub fn summary(&self) -> String {
        format!(
            "Tested {} files ({} failed, {} uncompilable, {} sources total).",
            self.tested, self.failed, self.uncompilable, self.total_sources
        )
    }
}
