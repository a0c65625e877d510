//! Shared test infrastructure for the star map workspace.
//!
//! Rendering tests write their posters to `<workspace>/test_output/` so the
//! results can be inspected by eye after a run:
//!
//! ```text
//! test_output/
//! ├── posters/   # PNG/JPEG/SVG exports from integration tests
//! └── ...        # anything else a test wants to keep
//! ```
//!
//! ```rust
//! use test_helpers::{artifact_path, find_project_root, output_path};
//!
//! let root = find_project_root().unwrap();
//! assert!(root.join("Cargo.toml").exists());
//!
//! let svg = artifact_path("posters", "example.svg");
//! assert!(svg.parent().unwrap().is_dir());
//! assert_eq!(output_path("posters/example.svg"), svg);
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No `Cargo.toml` with a `[workspace]` table above the current directory
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// True when `dir` holds a `Cargo.toml` declaring a `[workspace]` table.
fn declares_workspace(dir: &Path) -> Result<bool, TestHelperError> {
    let manifest = dir.join("Cargo.toml");
    if !manifest.is_file() {
        return Ok(false);
    }
    std::fs::read_to_string(&manifest)
        .map(|text| text.lines().any(|line| line.trim() == "[workspace]"))
        .map_err(|e| {
            TestHelperError::ProjectRootNotFound(format!("unreadable {}: {e}", manifest.display()))
        })
}

/// Nearest ancestor of the current directory (itself included) whose
/// manifest declares the workspace.
///
/// Tests run with the member crate as working directory, so the member's
/// own manifest is skipped over on the way up.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let start = env::current_dir()
        .map_err(|e| TestHelperError::ProjectRootNotFound(format!("no current directory: {e}")))?;

    for dir in start.ancestors() {
        if declares_workspace(dir)? {
            return Ok(dir.to_path_buf());
        }
    }
    Err(TestHelperError::ProjectRootNotFound(format!(
        "no workspace manifest above {}",
        start.display()
    )))
}

static OUTPUT_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let root = find_project_root().expect("tests must run inside the workspace");
    root.join("test_output")
});

/// `<workspace>/test_output`, created if missing
pub fn get_output_dir() -> PathBuf {
    std::fs::create_dir_all(&*OUTPUT_DIR).expect("test_output must be writable");
    OUTPUT_DIR.clone()
}

/// Path of `path` inside the test output directory.
///
/// Parent directories of `path` are not created; see [`artifact_path`].
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Path of `file_name` inside `test_output/<group>/`, creating the group
/// directory so the test can write immediately
pub fn artifact_path(group: &str, file_name: &str) -> PathBuf {
    let dir = output_path(group);
    std::fs::create_dir_all(&dir).expect("Failed to create artifact directory");
    dir.join(file_name)
}
