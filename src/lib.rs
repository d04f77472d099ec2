/*!
 * # Shears - chapter markers for video files
 *
 * A Rust library for adding chapter markers and metadata to video files
 * with ffmpeg.
 *
 * ## Features
 *
 * - Parse human-readable chapter lists (`HH:MM:SS`/`MM:SS` timecodes + titles)
 * - Generate FFMETADATA1 chapter documents
 * - Optional global metadata (title, author, year)
 * - Optional subtitle track muxing with ISO 639 language tags
 * - Stream-copy muxing, no re-encoding
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: timecode string <-> millisecond conversion
 * - `chapters`: chapter list parsing, escaping and ordering
 * - `metadata`: FFMETADATA1 document generation
 * - `media`: ffmpeg/ffprobe invocation (duration probe, muxing)
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: file system operations
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chapters;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod metadata;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{ChapterJob, Controller, OutputDecision, resolve_output_path};
pub use chapters::{Chapter, ChapterList, parse_chapter_lines};
pub use errors::{AppError, ChapterError, MuxError, TimecodeError};
pub use metadata::{GlobalMetadata, render_document};
pub use timecode::{format_timecode, parse_timecode};
