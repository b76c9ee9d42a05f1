#![forbid(unsafe_code)]
//! AST Round-Trip Equivalence Harness
//!
//! Verifies that the compiler's AST serializer is self-consistent: exporting a
//! program's AST as a combined JSON document, re-importing that document, and
//! exporting it again must produce byte-identical text. The harness discovers
//! test sources, splits multi-contract files into standalone inputs via an
//! external tool, drives the compiler as a black-box subprocess, and
//! aggregates outcomes into a single verdict with a CI-friendly exit status.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` and `harness` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod harness;

pub use harness::config::HarnessConfig;
pub use harness::counters::Counters;
pub use harness::interfaces::{CompilerDriver, HarnessError, SourceSplitter};
pub use harness::runner::run_suite;
pub use harness::splitter::SplitOutcome;
pub use harness::verifier::CaseOutcome;
