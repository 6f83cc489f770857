//! Harness I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the two external
//! collaborators of the harness:
//! - Building the executable under test (cargo invocation)
//! - Running the artifact against a fixture (subprocess + stdout capture)
//!
//! The pipeline in `harness` is written against these traits so the
//! build-run-compare loop can be exercised with fakes instead of real
//! subprocesses. The default implementations are process-backed.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors that abort the whole run.
///
/// Per-fixture failures (output mismatch, timeout) are not errors; they are
/// recorded as [`FixtureStatus`](super::compare::FixtureStatus) values and the
/// run continues. `HarnessError` is reserved for conditions where nothing
/// meaningful can be reported: an unreadable fixture directory, a build tool
/// that cannot be invoked at all, or a capture file that cannot be written.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to scan fixture directory '{dir}': {source}")]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to invoke build step: {0}")]
    Build(String),

    #[error("failed to execute '{artifact}': {source}")]
    Execution {
        artifact: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write captured output '{path}': {source}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Builder interface
// ============================================================================

/// Outcome of a build attempt.
///
/// `Failed` means the build tool ran and reported failure; it is a normal
/// outcome, distinct from [`HarnessError::Build`] (the tool could not be
/// invoked at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Build succeeded; the artifact lives at this path.
    Built(PathBuf),
    Failed,
}

/// Produce a fresh artifact of the executable under test.
///
/// Implementations must discard previously built artifacts before compiling,
/// so a stale executable from an earlier run can never be mistaken for the
/// current one. Success is classified by the build step's own exit status,
/// never by inspecting its output text.
pub trait Builder {
    /// Quiet build. `Ok(Built(path))` on success, `Ok(Failed)` when the
    /// build tool itself reports failure.
    fn build(&self) -> Result<BuildOutcome, HarnessError>;

    /// Re-run the build in a mode that surfaces compiler output verbatim,
    /// for the user to debug. Called only after `build()` returned `Failed`.
    fn diagnose(&self) -> Result<(), HarnessError>;
}

// ============================================================================
// Executor interface
// ============================================================================

/// Captured result of one artifact run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Everything the child wrote to stdout, possibly empty or partial.
    pub stdout: Vec<u8>,
    /// Child exit code; `None` when killed by a signal or a timeout.
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

/// Run the artifact against one fixture input and capture its stdout.
///
/// A crashing or non-zero-exiting child is not an error at this level:
/// whatever reached stdout is returned and compared as-is. The exit code is
/// carried along for reporting.
pub trait Executor {
    fn execute(
        &self,
        artifact: &Path,
        input: &Path,
        timeout: Option<Duration>,
    ) -> Result<Execution, HarnessError>;
}

// ============================================================================
// Default implementations
// ============================================================================

/// Cargo-backed builder for the executable under test.
///
/// Builds `<project_dir>` in release mode; the artifact is expected at
/// `<project_dir>/target/release/<bin_name>`.
pub struct CargoBuilder {
    project_dir: PathBuf,
    bin_name: String,
}

impl CargoBuilder {
    pub fn new(project_dir: impl AsRef<Path>, bin_name: &str) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            bin_name: bin_name.to_string(),
        }
    }

    /// Path where a successful build leaves the binary.
    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir
            .join("target")
            .join("release")
            .join(&self.bin_name)
    }

    fn cargo(&self) -> Command {
        let mut cmd = Command::new("cargo");
        cmd.current_dir(&self.project_dir);
        cmd
    }
}

impl Builder for CargoBuilder {
    fn build(&self) -> Result<BuildOutcome, HarnessError> {
        // Discard prior release artifacts first. A stale binary passing (or
        // failing) fixtures would be a misleading signal.
        let clean = self
            .cargo()
            .args(["clean", "--release"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| HarnessError::Build(format!("failed to run cargo clean: {}", e)))?;
        if !clean.success() {
            return Err(HarnessError::Build(format!(
                "cargo clean exited with {} in '{}'",
                clean,
                self.project_dir.display()
            )));
        }

        let output = self
            .cargo()
            .args(["build", "--release", "--quiet"])
            .output()
            .map_err(|e| HarnessError::Build(format!("failed to run cargo build: {}", e)))?;

        if output.status.success() {
            Ok(BuildOutcome::Built(self.artifact_path()))
        } else {
            Ok(BuildOutcome::Failed)
        }
    }

    fn diagnose(&self) -> Result<(), HarnessError> {
        // Rebuild with inherited stdio so compiler errors reach the user
        // verbatim. The artifact (if any) is ignored.
        self.cargo()
            .args(["build", "--release"])
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| HarnessError::Build(format!("failed to run cargo build: {}", e)))?;
        Ok(())
    }
}

/// Subprocess executor: `<artifact> <input>` with stdout piped.
///
/// Without a timeout this is an ordinary blocking wait. With a timeout, a
/// drain thread reads the stdout pipe while the parent polls for exit, so a
/// chatty child cannot deadlock on a full pipe buffer; on expiry the child is
/// killed and whatever it wrote so far is returned with `timed_out` set.
pub struct ProcessExecutor;

impl ProcessExecutor {
    const POLL_INTERVAL: Duration = Duration::from_millis(10);
}

impl Executor for ProcessExecutor {
    fn execute(
        &self,
        artifact: &Path,
        input: &Path,
        timeout: Option<Duration>,
    ) -> Result<Execution, HarnessError> {
        let mut child = Command::new(artifact)
            .arg(input)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| HarnessError::Execution {
                artifact: artifact.to_path_buf(),
                source: e,
            })?;

        let Some(limit) = timeout else {
            let output = child.wait_with_output()?;
            return Ok(Execution {
                stdout: output.stdout,
                exit_code: output.status.code(),
                timed_out: false,
            });
        };

        let Some(mut pipe) = child.stdout.take() else {
            // Unreachable with Stdio::piped, but fail closed rather than panic.
            return Err(HarnessError::Execution {
                artifact: artifact.to_path_buf(),
                source: std::io::Error::other("child stdout was not captured"),
            });
        };
        let drain = std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        });

        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait()? {
                let stdout = drain.join().unwrap_or_default();
                return Ok(Execution {
                    stdout,
                    exit_code: status.code(),
                    timed_out: false,
                });
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                let stdout = drain.join().unwrap_or_default();
                return Ok(Execution {
                    stdout,
                    exit_code: None,
                    timed_out: true,
                });
            }
            std::thread::sleep(Self::POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cargo_builder_artifact_path_is_release_binary() {
        let builder = CargoBuilder::new("/work/vm", "vm");
        assert_eq!(
            builder.artifact_path(),
            PathBuf::from("/work/vm/target/release/vm")
        );
    }

    #[test]
    fn execution_records_exit_code() {
        let exec = Execution {
            stdout: b"42".to_vec(),
            exit_code: Some(1),
            timed_out: false,
        };
        assert_eq!(exec.exit_code, Some(1));
        assert!(!exec.timed_out);
    }
}
