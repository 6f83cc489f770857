//! Build-run-compare pipeline
//!
//! Control flow, strictly sequential:
//! discover fixtures → build (gate) → per fixture: run, capture, compare,
//! report → aggregate verdict.
//!
//! A build failure short-circuits the run before any fixture is attempted:
//! running a stale or partially built executable would produce misleading
//! pass/fail signals. Per-fixture failures are isolated; one fixture never
//! prevents the next from being attempted.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod compare;
pub mod interfaces;
pub mod locator;
pub mod reporter;

use std::fs;
use std::path::Path;
use std::time::Duration;

use self::compare::{compare_against_golden, FixtureStatus};
use self::interfaces::{BuildOutcome, Builder, Executor, HarnessError};
use self::locator::{discover_fixtures, Fixture};
use self::reporter::Reporter;

/// Outcome of one fixture, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
    pub fixture: Fixture,
    pub status: FixtureStatus,
    /// Exit code of the executable under test. Informational: a non-zero
    /// exit does not fail the fixture by itself, the captured output does.
    pub exit_code: Option<i32>,
}

/// Aggregate verdict of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AllPassed,
    AnyFailed,
    BuildFailed,
}

impl Verdict {
    /// Process exit code contract: 0 only when everything passed.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::AllPassed => 0,
            Verdict::AnyFailed | Verdict::BuildFailed => 1,
        }
    }
}

/// Full-run result: ordered per-fixture records plus the aggregate verdict.
#[derive(Debug)]
pub struct HarnessReport {
    pub records: Vec<FixtureRecord>,
    pub verdict: Verdict,
}

/// The harness pipeline, generic over its build and execution capabilities.
pub struct Harness<B, E> {
    builder: B,
    executor: E,
    timeout: Option<Duration>,
}

impl<B: Builder, E: Executor> Harness<B, E> {
    pub fn new(builder: B, executor: E) -> Self {
        Self {
            builder,
            executor,
            timeout: None,
        }
    }

    /// Set a per-fixture time limit. Without one, a hung executable hangs
    /// the harness; acceptable for local use, not for CI.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the whole suite against the fixtures in `fixture_dir`.
    ///
    /// Returns `Err` only for fatal setup problems (unreadable fixture
    /// directory, uninvokable build tool, unwritable capture file). Build
    /// failure and fixture failures are normal outcomes carried in the
    /// report's verdict.
    pub fn run(
        &self,
        fixture_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<HarnessReport, HarnessError> {
        let fixtures = discover_fixtures(fixture_dir)?;
        tracing::debug!(count = fixtures.len(), dir = %fixture_dir.display(), "discovered fixtures");

        let artifact = match self.builder.build()? {
            BuildOutcome::Built(path) => path,
            BuildOutcome::Failed => {
                self.builder.diagnose()?;
                reporter.on_build_failure();
                let report = HarnessReport {
                    records: Vec::new(),
                    verdict: Verdict::BuildFailed,
                };
                reporter.on_run_complete(&report);
                return Ok(report);
            }
        };
        tracing::debug!(artifact = %artifact.display(), "build succeeded");

        let mut records = Vec::with_capacity(fixtures.len());
        let mut any_failed = false;
        for fixture in fixtures {
            let record = self.run_fixture(&artifact, fixture)?;
            if !record.status.is_pass() {
                any_failed = true;
            }
            reporter.on_fixture_result(&record.fixture, &record.status);
            records.push(record);
        }

        let verdict = if any_failed {
            Verdict::AnyFailed
        } else {
            Verdict::AllPassed
        };
        let report = HarnessReport { records, verdict };
        reporter.on_run_complete(&report);
        Ok(report)
    }

    fn run_fixture(&self, artifact: &Path, fixture: Fixture) -> Result<FixtureRecord, HarnessError> {
        let execution = self
            .executor
            .execute(artifact, &fixture.input_path, self.timeout)?;

        // Capture file is overwritten on every run; it exists even for a
        // timed-out or crashed child so the partial output can be inspected.
        let actual_path = fixture.actual_path();
        fs::write(&actual_path, &execution.stdout).map_err(|e| HarnessError::Capture {
            path: actual_path,
            source: e,
        })?;

        let status = if execution.timed_out {
            FixtureStatus::TimedOut
        } else {
            compare_against_golden(&execution.stdout, &fixture.expected_path())
        };

        Ok(FixtureRecord {
            fixture,
            status,
            exit_code: execution.exit_code,
        })
    }
}
