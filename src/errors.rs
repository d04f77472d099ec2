/*!
 * Error types for the shears application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing timecode strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// The text does not match either accepted timecode shape
    #[error("invalid timecode \"{text}\": expected HH:MM:SS or MM:SS")]
    Format {
        /// The offending literal text
        text: String,
    },
}

/// Errors that can occur while building or validating a chapter list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChapterError {
    /// Timecode and title counts diverged after parsing. This signals a
    /// programming defect, not a user-input problem.
    #[error("parse invariant violated: {timecodes} timecodes but {titles} titles")]
    Structural {
        /// Number of timecodes collected
        timecodes: usize,
        /// Number of titles collected
        titles: usize,
    },

    /// The media is not strictly longer than the last chapter start
    #[error(
        "the video ({duration_ms} ms) is shorter than the last chapter start \
         ({last_start_ms} ms). Please check the timecodes"
    )]
    Duration {
        /// Total media duration in milliseconds
        duration_ms: u64,
        /// Start offset of the final chapter in milliseconds
        last_start_ms: u64,
    },

    /// A chapter was left without a title
    #[error("empty chapter title at {timecode}")]
    EmptyTitle {
        /// Timecode of the offending chapter
        timecode: String,
    },

    /// Nothing to merge into the output file
    #[error("no chapters, metadata or subtitles found")]
    NothingToApply,

    /// A timecode in the list failed to parse
    #[error(transparent)]
    Timecode(#[from] TimecodeError),
}

/// Errors from invoking the external media tools (ffmpeg/ffprobe)
#[derive(Error, Debug)]
pub enum MuxError {
    /// The tool is not installed or not reachable on PATH
    #[error("{tool} is not installed. Please install it before running shears (https://ffmpeg.org/)")]
    ToolMissing {
        /// Binary name that could not be run
        tool: String,
    },

    /// Spawning the subprocess failed
    #[error("failed to execute {tool}: {source}")]
    Spawn {
        /// Binary name
        tool: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The subprocess did not finish within the configured timeout
    #[error("{tool} timed out after {seconds} seconds")]
    Timeout {
        /// Binary name
        tool: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// ffprobe output could not be interpreted as a duration
    #[error("could not read media duration from ffprobe output: {0}")]
    Probe(String),

    /// The tool exited with a non-zero status. Never retried; the literal
    /// command is carried for diagnostics.
    #[error("ffmpeg failed: {stderr}\nTry running this command in a terminal to see the error:\n{command}")]
    CommandFailed {
        /// The rendered command line that was executed
        command: String,
        /// Filtered stderr from the tool
        stderr: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timecode parsing
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Error from chapter list handling
    #[error("Chapter error: {0}")]
    Chapter(#[from] ChapterError),

    /// Error from the external media tools
    #[error("Mux error: {0}")]
    Mux(#[from] MuxError),

    /// Error in the application configuration
    #[error("Config error: {0}")]
    Config(String),
}
