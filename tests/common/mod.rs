/*!
 * Common test utilities for the shears test suite
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample chapter list file for testing
pub fn create_test_chapter_file(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "0:00 Intro\n\
                   1:30 First verse\n\
                   this line has no timecode\n\
                   1:02:03 Finale\n";
    create_test_file(dir, filename, content)
}
