/*!
 * End-to-end tests of the chapter document workflow: read a chapter file,
 * parse, sort, render the metadata document and write it to disk. The
 * actual ffmpeg invocation is exercised manually, not here.
 */

use anyhow::Result;
use shears::app_config::Config;
use shears::app_controller::Controller;
use shears::chapters::ChapterList;
use shears::file_utils::FileManager;
use shears::metadata::{GlobalMetadata, render_document};
use crate::common;

/// Test the full text pipeline from file to rendered document
#[test]
fn test_workflow_withChapterFile_shouldRenderCompleteDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let chapter_file = common::create_test_chapter_file(&dir, "chapters.txt")?;

    let lines = FileManager::read_lines(&chapter_file)?;
    let chapters = ChapterList::from_lines(&lines)?.sorted();
    chapters.ensure_titles()?;

    assert_eq!(chapters.len(), 3);

    let metadata = GlobalMetadata {
        title: "Test Movie".to_string(),
        artist: "Tester".to_string(),
        date: "2023".to_string(),
    };
    // a duration comfortably past the last chapter at 1:02:03
    let doc = render_document(chapters.chapters(), 4_000_000, &metadata)?;

    assert!(doc.starts_with(";FFMETADATA1\n"));
    assert!(doc.contains("title=Test Movie\n"));
    assert!(doc.contains("# Chapter 1 starts at 0:00\n"));
    assert!(doc.contains("# Chapter 3 starts at 1:02:03\n"));
    assert!(doc.contains("START=3723000\n"));
    assert!(doc.contains("END=4000000\n"));
    // the noise line contributed no chapter
    assert!(!doc.contains("no timecode"));

    Ok(())
}

/// Test that the rendered document can be written and read back verbatim
#[test]
fn test_workflow_withRenderedDocument_shouldWriteVerbatimSidecar() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let lines = ["0:00 Intro", "2:00 Outro"];
    let chapters = ChapterList::from_lines(&lines)?.sorted();
    let doc = render_document(chapters.chapters(), 300_000, &GlobalMetadata::default())?;

    let sidecar = dir.join("metadata.txt");
    FileManager::write_to_file(&sidecar, &doc)?;

    assert_eq!(FileManager::read_to_string(&sidecar)?, doc);

    Ok(())
}

/// Test that an unsorted chapter file still renders in ascending time order
#[test]
fn test_workflow_withUnsortedChapterFile_shouldRenderAscending() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let chapter_file = common::create_test_file(
        &dir,
        "unsorted.txt",
        "2:00 Second\n0:00 First\n",
    )?;

    let lines = FileManager::read_lines(&chapter_file)?;
    let chapters = ChapterList::from_lines(&lines)?.sorted();
    let doc = render_document(chapters.chapters(), 300_000, &GlobalMetadata::default())?;

    let first_pos = doc.find("title=First").unwrap();
    let second_pos = doc.find("title=Second").unwrap();
    assert!(first_pos < second_pos);

    Ok(())
}

/// Test that a validation failure aborts before anything is written
#[test]
fn test_workflow_withShortDuration_shouldFailBeforeWriting() -> Result<()> {
    let lines = ["0:00 Intro", "10:00 Beyond the end"];
    let chapters = ChapterList::from_lines(&lines)?.sorted();

    let result = render_document(chapters.chapters(), 60_000, &GlobalMetadata::default());
    assert!(result.is_err());

    Ok(())
}

/// Test that the controller builds from a default configuration
#[test]
fn test_controller_withDefaultConfig_shouldConstruct() {
    assert!(Controller::with_config(Config::default()).is_ok());
}
