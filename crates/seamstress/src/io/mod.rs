//! Mesh file I/O.
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✗ | `vt` UVs, `l` lines become wire edges |
//! | JSON mesh | `.json` | ✓ | ✓ | Also stores seam flags |
//!
//! OBJ has no way to express seam flags, so a mesh that should be exported
//! in `SEAM` mode must come from JSON (or be marked in `AUTO` mode first
//! and saved back to JSON).

pub mod json;
pub mod obj;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PatternError, Result};
use crate::mesh::UvMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Json,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "obj" => Some(MeshFormat::Obj),
                "json" => Some(MeshFormat::Json),
                _ => None,
            })
    }
}

fn unsupported(path: &Path) -> PatternError {
    PatternError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    }
}

/// Load a mesh from file, auto-detecting format from extension.
pub fn load_mesh(path: &Path) -> Result<UvMesh> {
    let format = MeshFormat::from_path(path).ok_or_else(|| unsupported(path))?;

    info!("Loading mesh from {:?} (format: {:?})", path, format);

    let content = std::fs::read_to_string(path).map_err(|e| PatternError::io(path, e))?;
    let mut mesh = match format {
        MeshFormat::Obj => obj::parse_obj(&content, path)?,
        MeshFormat::Json => json::parse_json(&content)?,
    };

    if mesh.name().is_none() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            mesh.set_name(stem);
        }
    }

    info!(
        "Loaded mesh: {} vertices, {} edges, {} faces",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces()
    );
    debug!(
        "{} wire edges, {} seam edges",
        mesh.wire_edges().count(),
        mesh.seam_edges().count()
    );
    if !mesh.has_uvs() {
        warn!("Mesh {:?} has no UV coordinates", path);
    }

    Ok(mesh)
}

/// Save a mesh. Only the JSON format can be written.
pub fn save_mesh(mesh: &UvMesh, path: &Path) -> Result<()> {
    match MeshFormat::from_path(path) {
        Some(MeshFormat::Json) => {
            let content = json::to_json(mesh)?;
            std::fs::write(path, content).map_err(|e| PatternError::io(path, e))?;
            info!("Saved mesh to {:?}", path);
            Ok(())
        }
        _ => Err(unsupported(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::linked_squares;

    #[test]
    fn format_from_extension() {
        assert_eq!(MeshFormat::from_path(Path::new("a.OBJ")), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path(Path::new("a.json")), Some(MeshFormat::Json));
        assert_eq!(MeshFormat::from_path(Path::new("a.stl")), None);
        assert_eq!(MeshFormat::from_path(Path::new("a")), None);
    }

    #[test]
    fn unsupported_extension_errors() {
        let err = load_mesh(Path::new("model.stl")).unwrap_err();
        assert!(matches!(err, PatternError::UnsupportedFormat { ref extension } if extension == "stl"));

        let (mesh, _) = linked_squares();
        assert!(save_mesh(&mesh, Path::new("model.obj")).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_mesh(Path::new("/nonexistent/dir/model.obj")).unwrap_err();
        assert!(matches!(err, PatternError::Io { .. }));
        assert!(err.to_string().contains("model.obj"));
    }
}
