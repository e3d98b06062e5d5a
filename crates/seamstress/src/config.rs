//! Export configuration.
//!
//! The same [`ExportConfig`] is built from command-line flags or read from
//! a YAML/JSON file; serde field defaults match [`ExportConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, Result};

/// Smallest accepted canvas side in pixels.
pub const MIN_SIZE: u32 = 8;
/// Largest accepted canvas side in pixels.
pub const MAX_SIZE: u32 = 32768;

/// Which sewing-guide markers to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlignmentMarkers {
    /// Outlines only.
    Off,
    /// Markers from wire edges already flagged as seams.
    Seam,
    /// Detect sewing edges first, mark them as seams, then draw markers.
    #[default]
    Auto,
}

impl AlignmentMarkers {
    /// Get mode name as string.
    pub fn name(&self) -> &'static str {
        match self {
            AlignmentMarkers::Off => "off",
            AlignmentMarkers::Seam => "seam",
            AlignmentMarkers::Auto => "auto",
        }
    }

    /// Parse mode from string.
    pub fn from_name(name: &str) -> Option<AlignmentMarkers> {
        match name.to_lowercase().as_str() {
            "off" | "none" => Some(AlignmentMarkers::Off),
            "seam" | "seams" | "marked" => Some(AlignmentMarkers::Seam),
            "auto" | "autodetect" => Some(AlignmentMarkers::Auto),
            _ => None,
        }
    }

    /// All available modes.
    pub fn all() -> &'static [AlignmentMarkers] {
        &[
            AlignmentMarkers::Off,
            AlignmentMarkers::Seam,
            AlignmentMarkers::Auto,
        ]
    }

    /// Whether markers are drawn at all.
    pub fn draws_markers(&self) -> bool {
        !matches!(self, AlignmentMarkers::Off)
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormat {
    #[default]
    Svg,
    Png,
    /// The draw list itself, for other renderers.
    Json,
}

impl FileFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Svg => "svg",
            FileFormat::Png => "png",
            FileFormat::Json => "json",
        }
    }

    /// Parse format from a name or extension.
    pub fn from_name(name: &str) -> Option<FileFormat> {
        match name.to_lowercase().trim_start_matches('.') {
            "svg" => Some(FileFormat::Svg),
            "png" => Some(FileFormat::Png),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    pub fn all() -> &'static [FileFormat] {
        &[FileFormat::Svg, FileFormat::Png, FileFormat::Json]
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check both sides are within [`MIN_SIZE`]..=[`MAX_SIZE`].
    pub fn validate(&self) -> Result<()> {
        let ok = |side: u32| (MIN_SIZE..=MAX_SIZE).contains(&side);
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(PatternError::InvalidSize {
                width: self.width,
                height: self.height,
                min: MIN_SIZE,
                max: MAX_SIZE,
            })
        }
    }
}

/// Settings for one pattern export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub alignment_markers: AlignmentMarkers,

    #[serde(default)]
    pub size: CanvasSize,

    #[serde(default)]
    pub format: FileFormat,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<()> {
        self.size.validate()
    }
}

/// Extensions replaced when the output format changes: every output format
/// plus EPS, which older pattern exports used.
fn is_replaceable_extension(ext: &str) -> bool {
    ext == "eps" || FileFormat::all().iter().any(|f| f.extension() == ext)
}

/// Give `path` the extension of `format`.
///
/// A known output extension is swapped for the new one; anything else is
/// kept and the format extension appended (`pattern.v2` -> `pattern.v2.svg`).
pub fn output_path(path: &Path, format: FileFormat) -> PathBuf {
    let ext = format.extension();
    let current = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match current {
        Some(e) if e == ext => path.to_path_buf(),
        Some(e) if is_replaceable_extension(&e) => path.with_extension(ext),
        Some(_) => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        None => path.with_extension(ext),
    }
}

/// Default output file: `<name>.<ext>` next to the input file.
pub fn default_output_path(input: &Path, mesh_name: Option<&str>, format: FileFormat) -> PathBuf {
    let stem = mesh_name
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "pattern".to_string());

    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{}.{}", stem, format.extension()))
}
