//! Export settings from a YAML file plus command-line overrides.
//!
//! ```yaml
//! alignment_markers: SEAM   # OFF | SEAM | AUTO
//! size:
//!   width: 2048
//!   height: 1024
//! format: PNG               # SVG | PNG | JSON
//! ```
//!
//! Every key is optional. JSON is valid YAML, so a JSON file works too.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use seamstress::{AlignmentMarkers, ExportConfig, FileFormat};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load an [`ExportConfig`] from a YAML file.
pub fn load_config(path: &Path) -> Result<ExportConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// An empty document means all defaults.
pub fn parse_config(content: &str) -> Result<ExportConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ExportConfig::default());
    }
    serde_yaml::from_str(content)
}

/// Values given on the command line. `None` keeps the config value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub markers: Option<AlignmentMarkers>,
    pub format: Option<FileFormat>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ExportConfig) {
        if let Some(markers) = self.markers {
            config.alignment_markers = markers;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(width) = self.width {
            config.size.width = width;
        }
        if let Some(height) = self.height {
            config.size.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seamstress::CanvasSize;

    #[test]
    fn parses_full_yaml() {
        let config = parse_config(
            "alignment_markers: SEAM\nsize:\n  width: 2048\n  height: 1024\nformat: PNG\n",
        )
        .unwrap();
        assert_eq!(config.alignment_markers, AlignmentMarkers::Seam);
        assert_eq!(config.size, CanvasSize::new(2048, 1024));
        assert_eq!(config.format, FileFormat::Png);
    }

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(parse_config("").unwrap(), ExportConfig::default());
        let config = parse_config("alignment_markers: OFF\n").unwrap();
        assert_eq!(config.alignment_markers, AlignmentMarkers::Off);
        assert_eq!(config.size, CanvasSize::default());
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(parse_config("alignment_markers: SOMETIMES\n").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut config = parse_config("alignment_markers: SEAM\nformat: PNG\n").unwrap();
        let overrides = Overrides {
            markers: Some(AlignmentMarkers::Off),
            width: Some(300),
            ..Overrides::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.alignment_markers, AlignmentMarkers::Off);
        assert_eq!(config.format, FileFormat::Png);
        assert_eq!(config.size, CanvasSize::new(300, 1024));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/settings.yaml")).unwrap_err();
        assert!(err.to_string().contains("settings.yaml"));
    }
}
