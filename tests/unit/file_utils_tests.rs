/*!
 * Tests for file and folder utilities
 */

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use autoedit::assets::AssetType;
use autoedit::file_utils::{FileManager, FileType};
use crate::common;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    frames: i64,
}

/// Test file and directory existence checks
#[test]
fn test_file_exists_shouldDistinguishFilesAndDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "script.txt", "Hello")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    Ok(())
}

/// Test directory creation, including nested parents
#[test]
fn test_ensure_dir_shouldCreateNestedDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // already existing is fine
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

/// Test writing into a directory that does not exist yet
#[test]
fn test_write_to_file_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("notes.txt");

    FileManager::write_to_file(&path, "first draft")?;

    assert_eq!(FileManager::read_to_string(&path)?, "first draft");
    Ok(())
}

/// Test JSON round trip through files
#[test]
fn test_write_json_and_read_json_shouldPreserveValue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sample.json");
    let sample = Sample { name: "intro".to_string(), frames: 90 };

    FileManager::write_json(&path, &sample)?;
    let loaded: Sample = FileManager::read_json(&path)?;

    assert_eq!(loaded, sample);
    assert!(fs::read_to_string(&path)?.contains('\n'));
    Ok(())
}

/// Test reading a malformed JSON file
#[test]
fn test_read_json_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "[1, 2")?;

    let result: Result<Sample> = FileManager::read_json(&path);
    assert!(result.is_err());
    Ok(())
}

/// Test file type detection by extension
#[test]
fn test_detect_file_type_shouldUseExtension() {
    assert_eq!(FileManager::detect_file_type("clip.MP4"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("shot.webm"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("chart.jpeg"), FileType::Image);
    assert_eq!(FileManager::detect_file_type("sfx/click.wav"), FileType::Audio);
    assert_eq!(FileManager::detect_file_type("script.txt"), FileType::Text);
    assert_eq!(FileManager::detect_file_type("archive.zip"), FileType::Unknown);
    assert_eq!(FileManager::detect_file_type("Makefile"), FileType::Unknown);
}

/// Test that the media scanner and the asset parser agree on every extension
#[test]
fn test_detect_file_type_shouldAgreeWithAssetType() {
    let names = [
        "a.mp4", "a.mov", "a.m4v", "a.webm", "a.mkv", "a.avi", "a.png", "a.JPG", "a.jpeg", "a.webp",
        "a.gif", "a.bmp", "a.wav", "a.txt", "a.zip", "noext",
    ];
    for name in names {
        let expected = match AssetType::from_path(name) {
            Some(AssetType::Video) => Some(FileType::Video),
            Some(AssetType::Image) => Some(FileType::Image),
            None => None,
        };
        let detected = FileManager::detect_file_type(name);
        match expected {
            Some(file_type) => assert_eq!(detected, file_type, "{}", name),
            None => assert!(
                !matches!(detected, FileType::Video | FileType::Image),
                "{} scanned as helper media",
                name
            ),
        }
    }
}

/// Test scanning a media directory
#[test]
fn test_collect_media_shouldSortFilesByKind() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "videos/b-roll.mp4", "")?;
    common::create_test_file(root, "videos/a-roll.mov", "")?;
    common::create_test_file(root, "images/chart.png", "")?;
    common::create_test_file(root, "sfx/Swoosh.wav", "")?;
    common::create_test_file(root, "sfx/click.mp3", "")?;
    common::create_test_file(root, "readme.md", "")?;

    let library = FileManager::collect_media(root)?;

    assert_eq!(library.helper_videos.len(), 2);
    assert!(library.helper_videos[0].ends_with("a-roll.mov"));
    assert!(library.helper_videos[1].ends_with("b-roll.mp4"));
    assert_eq!(library.helper_images.len(), 1);
    assert_eq!(library.sfx.len(), 2);
    assert!(library.sfx["swoosh"].ends_with("Swoosh.wav"));
    assert!(library.sfx.contains_key("click"));
    assert!(!library.is_empty());
    Ok(())
}

/// Test scanning a missing directory
#[test]
fn test_collect_media_withMissingDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::collect_media(temp_dir.path().join("nope")).is_err());

    let empty = FileManager::collect_media(temp_dir.path())?;
    assert!(empty.is_empty());
    Ok(())
}
