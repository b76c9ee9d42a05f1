//! The round-trip harness proper
//!
//! ## Pipeline
//!
//! Discovery → (per file) splitter adapter → compilability probe →
//! export / reimport / compare → counters → final verdict.
//!
//! ## Modules
//!
//! - `config` - Harness configuration (paths, env overrides)
//! - `counters` - Run-wide pass/fail/uncompilable tally
//! - `discovery` - Test source enumeration with exclusion policy
//! - `interfaces` - Collaborator seams (compiler, splitter) and error taxonomy
//! - `invoke` - Black-box subprocess invocation with stream capture
//! - `runner` - Per-case control flow and final verdict
//! - `splitter` - Splitter tool outcome decoding
//! - `verifier` - Export → import → export state machine
//! - `workspace` - Scoped per-case temporary directories
//!
//! ## Design
//!
//! External collaborators (the compiler, the source splitter, the diff
//! utility) are invoked as subprocesses and never reimplemented. Their seams
//! are the traits in `interfaces`, so tests can substitute scripted stubs.
//! Test cases run strictly sequentially; the collaborators share working
//! directories and are not safe to invoke concurrently.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod counters;
pub mod discovery;
pub mod interfaces;
pub mod invoke;
pub mod runner;
pub mod splitter;
pub mod verifier;
pub mod workspace;
