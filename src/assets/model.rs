/*!
 * Helper asset model.
 *
 * Asset authors label their files through the file name: `widget-x-demo.mp4`
 * yields the title "Widget X Demo" and the keywords `widget` and `demo`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static NAME_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s\-_.,+]+").expect("Invalid name separator regex")
});

const MIN_KEYWORD_LEN: usize = 3;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "mkv", "avi"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Kind of helper asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Video,
    Image,
}

impl AssetType {
    /// Guess the asset type from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// How the asset fills its layout slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Cover,
    Contain,
}

/// A supporting video or image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperAsset {
    pub asset_type: AssetType,

    /// Source reference (path or URL) as supplied by the caller
    pub source: String,

    /// Display title derived from the file name
    pub title: String,

    /// Lowercased name tokens of at least 3 characters, deduplicated
    pub keywords: Vec<String>,

    pub fit_mode: FitMode,
}

impl HelperAsset {
    /// Derive an asset from its file path
    pub fn from_path(source: &str, asset_type: AssetType) -> Self {
        let stem = Path::new(source)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let tokens: Vec<&str> = NAME_SEPARATOR_REGEX
            .split(&stem)
            .filter(|t| !t.is_empty())
            .collect();

        let mut keywords: Vec<String> = Vec::new();
        for token in &tokens {
            let lowered = token.to_lowercase();
            if lowered.chars().count() >= MIN_KEYWORD_LEN && !keywords.contains(&lowered) {
                keywords.push(lowered);
            }
        }

        let title = tokens.iter().map(|t| capitalize(t)).collect::<Vec<_>>().join(" ");

        let fit_mode = match asset_type {
            AssetType::Video => FitMode::Cover,
            AssetType::Image => FitMode::Contain,
        };

        Self {
            asset_type,
            source: source.to_string(),
            title,
            keywords,
            fit_mode,
        }
    }

    /// Derive an asset, inferring its type from the extension (video when unknown)
    pub fn from_source(source: &str) -> Self {
        let asset_type = AssetType::from_path(source).unwrap_or(AssetType::Video);
        Self::from_path(source, asset_type)
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
