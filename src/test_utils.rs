//! Test utilities for building temporary project trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{OUTPUT_FILE_NAME, PREFERENCE_FILE_NAME};

/// A temporary project directory for testing.
///
/// The directory is removed when dropped.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Fill the project with `dirs` directories of `files_per_dir` files each,
    /// plus a `node_modules` directory of the same shape.
    pub fn populate(&self, dirs: usize, files_per_dir: usize) {
        for d in 0..dirs {
            for f in 0..files_per_dir {
                let ext = ["rs", "py", "md", "json"][f % 4];
                self.add_file(&format!("src/mod{}/file{}.{}", d, f, ext), "content\n");
            }
        }
        for f in 0..files_per_dir {
            self.add_file(&format!("node_modules/pkg/file{}.js", f), "");
        }
    }

    /// Path of the generated document in the project root.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILE_NAME)
    }

    /// Path of the preference file in the project root.
    pub fn preference_path(&self) -> PathBuf {
        self.dir.path().join(PREFERENCE_FILE_NAME)
    }

    /// Contents of the generated document.
    pub fn read_output(&self) -> String {
        fs::read_to_string(self.output_path()).expect("Failed to read output document")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
