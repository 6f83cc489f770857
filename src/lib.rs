#![forbid(unsafe_code)]
//! goldrun — golden-file regression harness
//!
//! goldrun builds an executable under test, feeds it a directory of binary
//! input fixtures (`<name>.o`), captures each run's stdout into
//! `<name>.student`, and compares the capture byte-for-byte against the
//! golden file `<name>.expected`. One status line is printed per fixture and
//! the process exits 0 only if the build succeeded and every fixture passed.
//!
//! The executable under test is opaque to the harness: it is invoked as
//! `<artifact> <fixture-path>` and is expected to write its result to stdout.
//!
//! ## Panic policy
//!
//! Production code uses `Result` with `?` / `ok_or` / `map_err`; the `cli`
//! and `harness` modules enforce `#![deny(clippy::unwrap_used)]`. `.unwrap()`
//! and `.expect()` are acceptable in test code.

pub mod cli;
pub mod harness;

pub use harness::compare::{FailureKind, FixtureStatus};
pub use harness::interfaces::{
    BuildOutcome, Builder, CargoBuilder, Execution, Executor, HarnessError, ProcessExecutor,
};
pub use harness::locator::Fixture;
pub use harness::reporter::{ConsoleReporter, Reporter};
pub use harness::{FixtureRecord, Harness, HarnessReport, Verdict};
