//! Byte-exact comparison against golden files
//!
//! The comparison is deliberately strict: any byte difference, including a
//! trailing newline, fails the fixture. Loosening this would silently change
//! test semantics.

use std::fs;
use std::path::Path;

/// Per-fixture outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureStatus {
    Passed,
    Failed(FailureKind),
    /// The run exceeded the per-fixture time limit and was killed.
    TimedOut,
}

/// Why a fixture failed. Both kinds report the same way; the distinction is
/// kept for consumers of [`HarnessReport`](super::HarnessReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Captured output differs from the golden file.
    Mismatch,
    /// Golden file absent or unreadable. The comparison cannot succeed, so
    /// it fails closed.
    MissingExpected,
}

impl FixtureStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, FixtureStatus::Passed)
    }
}

/// Compare captured output bytes against the golden file at `expected_path`.
pub fn compare_against_golden(actual: &[u8], expected_path: &Path) -> FixtureStatus {
    match fs::read(expected_path) {
        Ok(expected) if expected == actual => FixtureStatus::Passed,
        Ok(_) => FixtureStatus::Failed(FailureKind::Mismatch),
        Err(_) => FixtureStatus::Failed(FailureKind::MissingExpected),
    }
}
