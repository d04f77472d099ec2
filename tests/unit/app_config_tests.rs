/*!
 * Tests for application configuration
 */

use anyhow::Result;
use shears::app_config::{Config, LogLevel};

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldPassValidation() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.output_suffix, "_Shear");
    assert_eq!(config.media_tools.ffmpeg_path, "ffmpeg");
    assert_eq!(config.media_tools.ffprobe_path, "ffprobe");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test a JSON round trip of the configuration
#[test]
fn test_config_serialization_withDefaultConfig_shouldRoundTrip() -> Result<()> {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.output_suffix, config.output_suffix);
    assert_eq!(parsed.media_tools.mux_timeout_secs, config.media_tools.mux_timeout_secs);
    assert_eq!(parsed.log_level, config.log_level);

    Ok(())
}

/// Test that missing fields fall back to defaults when deserializing
#[test]
fn test_config_deserialization_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;
    assert_eq!(config.output_suffix, "_Shear");
    assert_eq!(config.media_tools.probe_timeout_secs, 60);
    Ok(())
}

/// Test that an empty output suffix is rejected
#[test]
fn test_validate_withEmptySuffix_shouldReturnError() {
    let mut config = Config::default();
    config.output_suffix = String::new();
    assert!(config.validate().is_err());
}

/// Test that a zero timeout is rejected
#[test]
fn test_validate_withZeroTimeout_shouldReturnError() {
    let mut config = Config::default();
    config.media_tools.mux_timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that an empty tool path is rejected
#[test]
fn test_validate_withEmptyFfmpegPath_shouldReturnError() {
    let mut config = Config::default();
    config.media_tools.ffmpeg_path = String::new();
    assert!(config.validate().is_err());
}

/// Test log level JSON names
#[test]
fn test_log_level_serialization_shouldUseLowercaseNames() -> Result<()> {
    let json = serde_json::to_string(&LogLevel::Debug)?;
    assert_eq!(json, "\"debug\"");
    let parsed: LogLevel = serde_json::from_str("\"warn\"")?;
    assert_eq!(parsed, LogLevel::Warn);
    Ok(())
}
