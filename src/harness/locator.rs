//! Fixture discovery
//!
//! A fixture is an input file `<name>.o` in the fixture directory, paired by
//! naming convention with the golden file `<name>.expected`. The harness
//! writes the captured run output next to them as `<name>.student`.

use std::fs;
use std::path::{Path, PathBuf};

use super::interfaces::HarnessError;

/// Recognized suffix of binary input fixtures.
pub const INPUT_SUFFIX: &str = "o";
/// Suffix of golden files, paired with the input by base name.
pub const EXPECTED_SUFFIX: &str = "expected";
/// Suffix of the captured-output file written per run.
pub const ACTUAL_SUFFIX: &str = "student";

/// A named test case: base identifier plus the location of its input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Base name, without any suffix.
    pub name: String,
    pub input_path: PathBuf,
}

impl Fixture {
    /// Golden file this fixture is compared against.
    pub fn expected_path(&self) -> PathBuf {
        self.input_path.with_extension(EXPECTED_SUFFIX)
    }

    /// Capture file overwritten on every run.
    pub fn actual_path(&self) -> PathBuf {
        self.input_path.with_extension(ACTUAL_SUFFIX)
    }
}

/// List the fixtures in `dir`, sorted by name.
///
/// Non-recursive: only direct children with the input suffix count. The sort
/// keeps reports stable and diffable across runs. An unreadable directory is
/// fatal; nothing can proceed without the fixture set.
pub fn discover_fixtures(dir: &Path) -> Result<Vec<Fixture>, HarnessError> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::Discovery {
        dir: dir.to_path_buf(),
        source: e,
    })?;

    let mut fixtures = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::Discovery {
            dir: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == INPUT_SUFFIX) {
            continue;
        }
        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            fixtures.push(Fixture {
                name: name.to_string(),
                input_path: path,
            });
        }
    }

    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(fixtures)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn discovers_only_input_suffix_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.o"), b"\x01").unwrap();
        fs::write(dir.path().join("a.o"), b"\x02").unwrap();
        fs::write(dir.path().join("a.expected"), b"1").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub.o")).unwrap();

        let fixtures = discover_fixtures(dir.path()).unwrap();
        let names: Vec<&str> = fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_fixtures(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn unreadable_directory_is_fatal() {
        let err = discover_fixtures(Path::new("/nonexistent/fixture/dir")).unwrap_err();
        assert!(matches!(err, HarnessError::Discovery { .. }));
    }

    #[test]
    fn companion_paths_swap_the_suffix() {
        let fixture = Fixture {
            name: "loop".to_string(),
            input_path: PathBuf::from("/work/tests/loop.o"),
        };
        assert_eq!(
            fixture.expected_path(),
            PathBuf::from("/work/tests/loop.expected")
        );
        assert_eq!(
            fixture.actual_path(),
            PathBuf::from("/work/tests/loop.student")
        );
    }
}
