use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::app_config::Config;
use crate::chapters::ChapterList;
use crate::errors::ChapterError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::media::{MediaTools, SubtitleTrack};
use crate::metadata::{GlobalMetadata, render_document};

// @module: Application controller for the chaptering workflow

/// A single chaptering request, assembled by the CLI layer.
#[derive(Debug, Clone)]
pub struct ChapterJob {
    /// Video file to add chapters to
    pub video_path: PathBuf,

    /// Text file holding the timecodes and titles
    pub chapters_path: PathBuf,

    /// Requested output path; the default is derived from the video path
    pub output_path: Option<PathBuf>,

    /// Optional global metadata fields
    pub metadata: GlobalMetadata,

    /// Optional subtitle file to mux in
    pub subtitle_path: Option<PathBuf>,

    /// ISO 639 language code for the subtitle track
    pub subtitle_language: Option<String>,

    /// Overwrite an existing output file instead of proposing a new name
    pub force_overwrite: bool,
}

/// Outcome of resolving the output path.
///
/// The decision logic is free of any UI calls; the calling code (CLI here,
/// a GUI elsewhere) interprets the tagged outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDecision {
    /// The path is safe to write to
    Proceed(PathBuf),

    /// The path is taken or equals the input; this free variant is offered
    ProposeAlternateName(PathBuf),

    /// No acceptable output path could be derived
    Abort(String),
}

/// Resolve where the muxed file should be written.
///
/// A requested path has its extension rewritten to match the video's
/// (container conversion is out of scope). The output may never equal the
/// input; existing files are only overwritten when `force_overwrite` is set.
pub fn resolve_output_path(
    video_path: &Path,
    requested: Option<&Path>,
    suffix: &str,
    force_overwrite: bool,
) -> OutputDecision {
    if video_path.file_stem().is_none() {
        return OutputDecision::Abort(format!(
            "cannot derive an output name from {:?}",
            video_path
        ));
    }

    let candidate = match requested {
        Some(path) => FileManager::with_matching_extension(path, video_path),
        None => FileManager::default_output_path(video_path, suffix),
    };

    if candidate == video_path {
        return OutputDecision::ProposeAlternateName(first_free_variant(video_path, suffix));
    }

    if FileManager::file_exists(&candidate) {
        if force_overwrite {
            return OutputDecision::Proceed(candidate);
        }
        return OutputDecision::ProposeAlternateName(first_free_variant(video_path, suffix));
    }

    OutputDecision::Proceed(candidate)
}

// First `<stem><suffix>(n).<ext>` that neither exists nor equals the input
fn first_free_variant(video_path: &Path, suffix: &str) -> PathBuf {
    let mut n = 0;
    loop {
        let candidate = FileManager::suffixed_output_path(video_path, suffix, n);
        if candidate != video_path && !FileManager::file_exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Main application controller for the chaptering workflow
pub struct Controller {
    config: Config,
    media_tools: MediaTools,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let media_tools = MediaTools::new(config.media_tools.clone());
        Ok(Self { config, media_tools })
    }

    /// Run the whole workflow: parse the chapter file, probe the media
    /// duration, render the metadata document to a temporary file and merge
    /// it into the output container.
    ///
    /// Any validation failure aborts before ffmpeg runs, so no partial
    /// output file is ever produced.
    pub async fn run(&self, job: ChapterJob) -> Result<PathBuf> {
        if !FileManager::file_exists(&job.video_path) {
            return Err(anyhow!("The movie file {:?} does not exist", job.video_path));
        }
        if !FileManager::file_exists(&job.chapters_path) {
            return Err(anyhow!(
                "The chapters file {:?} does not exist",
                job.chapters_path
            ));
        }

        self.media_tools.check_tools().await?;

        let chapters = self.load_chapters(&job.chapters_path)?;
        let subtitle = self.resolve_subtitle(&job)?;

        if chapters.is_empty() && job.metadata.is_empty() && subtitle.is_none() {
            return Err(ChapterError::NothingToApply.into());
        }

        let output_path = match resolve_output_path(
            &job.video_path,
            job.output_path.as_deref(),
            &self.config.output_suffix,
            job.force_overwrite,
        ) {
            OutputDecision::Proceed(path) => path,
            OutputDecision::ProposeAlternateName(path) => {
                return Err(anyhow!(
                    "The output file already exists or matches the input. \
                     Re-run with -f to overwrite, or use -o {:?}",
                    path
                ));
            }
            OutputDecision::Abort(reason) => return Err(anyhow!(reason)),
        };

        // The duration is only consulted for chapter end boundaries; a
        // metadata-only run skips the probe
        let duration_ms = if chapters.is_empty() {
            0
        } else {
            let duration = self.media_tools.probe_duration_ms(&job.video_path).await?;
            debug!("Media duration: {} ms", duration);
            duration
        };

        // Metadata document is optional: a subtitle-only job has none
        let document = if chapters.is_empty() && job.metadata.is_empty() {
            None
        } else {
            Some(render_document(chapters.chapters(), duration_ms, &job.metadata)?)
        };

        // The sidecar lives only as long as the mux; dropping the handle
        // deletes it
        let metadata_file = match &document {
            Some(text) => Some(write_sidecar(text)?),
            None => None,
        };

        info!(
            "Merging {} chapter(s) into {:?}",
            chapters.len(),
            output_path
        );

        self.media_tools
            .mux(
                &job.video_path,
                metadata_file.as_ref().map(|f| f.path()),
                subtitle.as_ref(),
                &output_path,
            )
            .await?;

        info!("File created: {:?}", output_path);
        Ok(output_path)
    }

    // Parse, sort and validate the chapter source file
    fn load_chapters(&self, chapters_path: &Path) -> Result<ChapterList> {
        let lines = FileManager::read_lines(chapters_path)?;
        let chapters = ChapterList::from_lines(&lines)
            .with_context(|| format!("Failed to parse chapters from {:?}", chapters_path))?
            .sorted();
        chapters.ensure_titles()?;

        if chapters.is_empty() {
            warn!("No chapters found in {:?}", chapters_path);
        } else {
            debug!("Parsed {} chapter(s)", chapters.len());
        }

        Ok(chapters)
    }

    fn resolve_subtitle(&self, job: &ChapterJob) -> Result<Option<SubtitleTrack>> {
        let Some(path) = &job.subtitle_path else {
            return Ok(None);
        };

        if !FileManager::file_exists(path) {
            return Err(anyhow!("The subtitle file {:?} does not exist", path));
        }

        let code = job.subtitle_language.as_deref().ok_or_else(|| {
            anyhow!("A subtitle file requires --subtitle-language (e.g. 'en', 'fre')")
        })?;

        let language = language_utils::normalize_to_part2t(code)?;
        if let Ok(name) = language_utils::get_language_name(&language) {
            debug!("Subtitle language: {} ({})", name, language);
        }

        Ok(Some(SubtitleTrack {
            path: path.clone(),
            language,
        }))
    }
}

// Write the rendered document verbatim to a temporary sidecar file
fn write_sidecar(document: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("shears-metadata-")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create temporary metadata file")?;
    file.write_all(document.as_bytes())
        .context("Failed to write metadata document")?;
    file.flush()?;
    Ok(file)
}
