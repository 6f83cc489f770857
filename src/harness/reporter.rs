//! Report rendering
//!
//! The console report is the harness's only output format: one fixed-width
//! line per fixture in discovery order, plus a banner when the build fails.
//! Calling infrastructure reads overall success from the exit code, not from
//! this text.
//!
//! The `Reporter` trait separates rendering from pipeline orchestration, so
//! tests record lines instead of printing them.

use super::compare::FixtureStatus;
use super::locator::Fixture;
use super::HarnessReport;

/// Banner printed when the build step fails. No fixture lines follow it.
pub const BUILD_FAILURE_BANNER: &str = "ERROR: build failed";

/// Width of the left-justified fixture-name field.
const NAME_WIDTH: usize = 10;

/// Callbacks invoked by the harness as the run progresses.
pub trait Reporter {
    /// The build failed; the run is over before any fixture was attempted.
    fn on_build_failure(&mut self) {}

    /// One fixture finished, in discovery order.
    fn on_fixture_result(&mut self, fixture: &Fixture, status: &FixtureStatus);

    /// The whole run finished (also called after a build failure).
    fn on_run_complete(&mut self, _report: &HarnessReport) {}
}

/// Render the per-fixture status line: left-justified name, then message.
pub fn render_status_line(fixture: &Fixture, status: &FixtureStatus) -> String {
    let message = match status {
        FixtureStatus::Passed => "passed",
        FixtureStatus::Failed(_) => "ERROR, outputs differ",
        FixtureStatus::TimedOut => "ERROR, timed out",
    };
    format!("{:<width$} {}", fixture.name, message, width = NAME_WIDTH)
}

/// Default reporter: prints to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_build_failure(&mut self) {
        println!("{}", BUILD_FAILURE_BANNER);
    }

    fn on_fixture_result(&mut self, fixture: &Fixture, status: &FixtureStatus) {
        println!("{}", render_status_line(fixture, status));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use insta::assert_snapshot;

    use super::*;
    use crate::harness::compare::FailureKind;

    fn fixture(name: &str) -> Fixture {
        Fixture {
            name: name.to_string(),
            input_path: PathBuf::from(format!("{name}.o")),
        }
    }

    #[test]
    fn passed_line_is_fixed_width() {
        assert_snapshot!(
            render_status_line(&fixture("a"), &FixtureStatus::Passed),
            @"a          passed"
        );
    }

    #[test]
    fn mismatch_and_missing_golden_render_identically() {
        let mismatch =
            render_status_line(&fixture("b"), &FixtureStatus::Failed(FailureKind::Mismatch));
        let missing = render_status_line(
            &fixture("b"),
            &FixtureStatus::Failed(FailureKind::MissingExpected),
        );
        assert_eq!(mismatch, missing);
        assert_snapshot!(mismatch, @"b          ERROR, outputs differ");
    }

    #[test]
    fn timed_out_line() {
        assert_snapshot!(
            render_status_line(&fixture("spin"), &FixtureStatus::TimedOut),
            @"spin       ERROR, timed out"
        );
    }

    #[test]
    fn long_names_push_the_message_right() {
        assert_snapshot!(
            render_status_line(&fixture("fibonacci_stress"), &FixtureStatus::Passed),
            @"fibonacci_stress passed"
        );
    }
}
