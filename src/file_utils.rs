use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and path utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file as a list of lines
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = Self::read_to_string(path)?;
        Ok(content.lines().map(|line| line.to_string()).collect())
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Default output path for a video: `<stem><suffix>.<ext>` next to the input.
    pub fn default_output_path<P: AsRef<Path>>(video_path: P, suffix: &str) -> PathBuf {
        Self::suffixed_output_path(video_path, suffix, 0)
    }

    /// Numbered variant of the default output path: `<stem><suffix>(n).<ext>`.
    /// A count of zero yields the unnumbered form.
    pub fn suffixed_output_path<P: AsRef<Path>>(video_path: P, suffix: &str, n: usize) -> PathBuf {
        let video_path = video_path.as_ref();
        let stem = video_path.file_stem().unwrap_or_default().to_string_lossy();
        let extension = video_path.extension().map(|e| e.to_string_lossy().to_string());

        let mut file_name = format!("{}{}", stem, suffix);
        if n > 0 {
            file_name.push_str(&format!("({})", n));
        }
        if let Some(ext) = extension {
            file_name.push('.');
            file_name.push_str(&ext);
        }

        video_path.with_file_name(file_name)
    }

    /// Rewrite a path's extension to match a reference file's extension.
    pub fn with_matching_extension<P1: AsRef<Path>, P2: AsRef<Path>>(
        path: P1,
        reference: P2,
    ) -> PathBuf {
        let path = path.as_ref().to_path_buf();
        match reference.as_ref().extension() {
            Some(ext) => path.with_extension(ext),
            None => path,
        }
    }
}
