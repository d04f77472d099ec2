use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Suffix appended to the video file stem when no output path is given
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// External media tool settings
    #[serde(default)]
    pub media_tools: MediaToolsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// ffmpeg/ffprobe invocation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaToolsConfig {
    // @field: ffmpeg binary name or path
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: ffprobe binary name or path
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    // @field: Timeout for duration probing
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    // @field: Timeout for the muxing step
    #[serde(default = "default_mux_timeout_secs")]
    pub mux_timeout_secs: u64,
}

impl Default for MediaToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            probe_timeout_secs: default_probe_timeout_secs(),
            mux_timeout_secs: default_mux_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_suffix() -> String {
    "_Shear".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    60
}

fn default_mux_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            media_tools: MediaToolsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            // An empty suffix would make the default output collide with the input
            return Err(anyhow!("output_suffix must not be empty"));
        }
        if self.media_tools.ffmpeg_path.is_empty() {
            return Err(anyhow!("media_tools.ffmpeg_path must not be empty"));
        }
        if self.media_tools.ffprobe_path.is_empty() {
            return Err(anyhow!("media_tools.ffprobe_path must not be empty"));
        }
        if self.media_tools.probe_timeout_secs == 0 {
            return Err(anyhow!("media_tools.probe_timeout_secs must be greater than zero"));
        }
        if self.media_tools.mux_timeout_secs == 0 {
            return Err(anyhow!("media_tools.mux_timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
