use std::path::{Path, PathBuf};
use std::process::Stdio;

use log::{debug, error};
use serde_json::{Value, from_str};
use tokio::process::Command;

use crate::app_config::MediaToolsConfig;
use crate::errors::MuxError;

// @module: ffmpeg/ffprobe invocation

/// A subtitle file to mux into the output container alongside the chapters.
#[derive(Debug, Clone)]
pub struct SubtitleTrack {
    /// Path to the subtitle file
    pub path: PathBuf,

    /// ISO 639-2/T language tag for the stream
    pub language: String,
}

/// Wrapper around the external media tools.
///
/// Every invocation is a single best-effort attempt; a non-zero exit is
/// reported upward with the literal command, never retried.
pub struct MediaTools {
    config: MediaToolsConfig,
}

impl MediaTools {
    pub fn new(config: MediaToolsConfig) -> Self {
        MediaTools { config }
    }

    /// Check that ffmpeg and ffprobe are installed and answer `-version`.
    pub async fn check_tools(&self) -> Result<(), MuxError> {
        for tool in [&self.config.ffmpeg_path, &self.config.ffprobe_path] {
            let status = Command::new(tool)
                .arg("-version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map_err(|_| MuxError::ToolMissing { tool: tool.clone() })?;

            if !status.success() {
                return Err(MuxError::ToolMissing { tool: tool.clone() });
            }
        }
        Ok(())
    }

    /// Probe the total media duration in milliseconds.
    ///
    /// Fractional milliseconds are truncated.
    pub async fn probe_duration_ms(&self, media_path: &Path) -> Result<u64, MuxError> {
        let args = vec![
            "-v".to_string(),
            "error".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            media_path.to_string_lossy().to_string(),
        ];

        let output = self
            .run_with_timeout(&self.config.ffprobe_path, &args, self.config.probe_timeout_secs)
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(MuxError::CommandFailed {
                command: render_command(&self.config.ffprobe_path, &args),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: Value = from_str(&stdout)
            .map_err(|e| MuxError::Probe(format!("invalid JSON from ffprobe: {}", e)))?;

        let seconds = json
            .get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| MuxError::Probe("missing format.duration field".to_string()))?;

        Ok((seconds * 1000.0) as u64)
    }

    /// Merge the metadata document and the optional subtitle track into the
    /// output container, stream-copying audio and video.
    ///
    /// Single attempt with no retry; on failure the rendered command line is
    /// carried in the error for the user to reproduce.
    pub async fn mux(
        &self,
        video_path: &Path,
        metadata_path: Option<&Path>,
        subtitle: Option<&SubtitleTrack>,
        output_path: &Path,
    ) -> Result<(), MuxError> {
        let args = Self::build_mux_args(video_path, metadata_path, subtitle, output_path);
        let command = render_command(&self.config.ffmpeg_path, &args);
        debug!("Running: {}", command);

        let output = self
            .run_with_timeout(&self.config.ffmpeg_path, &args, self.config.mux_timeout_secs)
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Muxing failed: {}", filtered);
            return Err(MuxError::CommandFailed {
                command,
                stderr: filtered,
            });
        }

        Ok(())
    }

    // Inputs are numbered in the order they are added: the video is always
    // input 0, the metadata document (if any) comes next, the subtitle last.
    fn build_mux_args(
        video_path: &Path,
        metadata_path: Option<&Path>,
        subtitle: Option<&SubtitleTrack>,
        output_path: &Path,
    ) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-y".to_string(),
            "-i".to_string(),
            video_path.to_string_lossy().to_string(),
        ];

        let mut next_input = 1usize;

        let metadata_input = metadata_path.map(|path| {
            args.push("-i".to_string());
            args.push(path.to_string_lossy().to_string());
            let index = next_input;
            next_input += 1;
            index
        });

        let subtitle_input = subtitle.map(|track| {
            args.push("-i".to_string());
            args.push(track.path.to_string_lossy().to_string());
            let index = next_input;
            next_input += 1;
            index
        });

        // Keep the metadata already present in the source, then layer the
        // generated document on top of it
        args.push("-map_metadata".to_string());
        args.push("0".to_string());
        if let Some(index) = metadata_input {
            args.push("-map_metadata".to_string());
            args.push(index.to_string());
        }

        args.push("-codec".to_string());
        args.push("copy".to_string());

        if let Some(track) = subtitle {
            let index = subtitle_input.unwrap_or(1);
            args.push("-map".to_string());
            args.push("0".to_string());
            args.push("-map".to_string());
            args.push(index.to_string());
            args.push("-c:s".to_string());
            args.push("mov_text".to_string());
            args.push("-metadata:s:s:0".to_string());
            args.push(format!("language={}", track.language));
        }

        args.push(output_path.to_string_lossy().to_string());
        args.push("-v".to_string());
        args.push("error".to_string());

        args
    }

    async fn run_with_timeout(
        &self,
        tool: &str,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<std::process::Output, MuxError> {
        let future = Command::new(tool).args(args).output();

        let timeout_duration = std::time::Duration::from_secs(timeout_secs);
        let output = tokio::select! {
            result = future => {
                result.map_err(|e| MuxError::Spawn {
                    tool: tool.to_string(),
                    source: e,
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(MuxError::Timeout {
                    tool: tool.to_string(),
                    seconds: timeout_secs,
                });
            }
        };

        Ok(output)
    }
}

/// Render a command line the user can paste into a terminal, quoting
/// arguments that contain whitespace.
pub fn render_command(tool: &str, args: &[String]) -> String {
    let mut rendered = String::from(tool);
    for arg in args {
        rendered.push(' ');
        if arg.contains(char::is_whitespace) {
            rendered.push('"');
            rendered.push_str(arg);
            rendered.push('"');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Chapter",
        "Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
