use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assets::AssetType;

// @module: File and directory utilities

const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "aac", "ogg", "flac", "m4a"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Read and parse a JSON document
    pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
        let content = Self::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {:?}", path.as_ref()))
    }

    /// Write a value as pretty-printed JSON
    pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        Self::write_to_file(path, &json)
    }

    /// Classify a file by its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        match AssetType::from_path(path.as_ref()) {
            Some(AssetType::Video) => return FileType::Video,
            Some(AssetType::Image) => return FileType::Image,
            None => {}
        }

        let Some(ext) = path.as_ref().extension() else {
            return FileType::Unknown;
        };
        let ext = ext.to_string_lossy().to_lowercase();

        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Audio
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Text
        } else {
            FileType::Unknown
        }
    }

    /// Walk a media directory and sort its files into helper videos, helper
    /// images and sound effects. Sound effects are keyed by lowercased file
    /// stem, so `sfx/Swoosh.wav` fills the `swoosh` slot.
    pub fn collect_media<P: AsRef<Path>>(dir: P) -> Result<MediaLibrary> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow::anyhow!("Media directory does not exist: {:?}", dir));
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        let mut library = MediaLibrary::default();
        for path in paths {
            let reference = path.to_string_lossy().into_owned();
            match Self::detect_file_type(&path) {
                FileType::Video => library.helper_videos.push(reference),
                FileType::Image => library.helper_images.push(reference),
                FileType::Audio => {
                    if let Some(stem) = path.file_stem() {
                        library
                            .sfx
                            .entry(stem.to_string_lossy().to_lowercase())
                            .or_insert(reference);
                    }
                }
                FileType::Text | FileType::Unknown => {}
            }
        }

        Ok(library)
    }
}

/// Enum representing different file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Video,
    Image,
    /// Sound effects
    Audio,
    /// Scripts
    Text,
    Unknown,
}

/// Media found in an asset directory, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLibrary {
    pub helper_videos: Vec<String>,
    pub helper_images: Vec<String>,
    pub sfx: BTreeMap<String, String>,
}

impl MediaLibrary {
    pub fn is_empty(&self) -> bool {
        self.helper_videos.is_empty() && self.helper_images.is_empty() && self.sfx.is_empty()
    }
}
