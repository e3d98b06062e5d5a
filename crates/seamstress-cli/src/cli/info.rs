//! Info command implementation.

use std::path::Path;

use serde::Serialize;

use seamstress::boundary::LoopStats;
use seamstress::{UvMesh, boundary_loop_groups, detect_seams, load_mesh};

/// Mesh summary, printed as text or JSON.
#[derive(Debug, Serialize)]
pub struct MeshInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub has_uvs: bool,
    /// Closed boundary contours (pattern pieces).
    pub boundary_loops: usize,
    pub boundary_edges: usize,
    pub wire_edges: usize,
    pub seam_edges: usize,
    /// Wire edges AUTO mode would mark.
    pub detected_seams: usize,
}

impl MeshInfo {
    pub fn from_mesh(mesh: &UvMesh) -> Self {
        let boundary = mesh.boundary_loops();
        let groups = boundary_loop_groups(mesh);
        let stats = LoopStats::from_groups(boundary.len(), &groups);

        Self {
            name: mesh.name().map(str::to_string),
            vertices: mesh.num_vertices(),
            edges: mesh.num_edges(),
            faces: mesh.num_faces(),
            has_uvs: mesh.has_uvs(),
            boundary_loops: stats.groups,
            boundary_edges: boundary.len(),
            wire_edges: mesh.wire_edges().count(),
            seam_edges: mesh.seam_edges().count(),
            detected_seams: detect_seams(mesh).len(),
        }
    }
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_mesh(input)?;
    let info = MeshInfo::from_mesh(&mesh);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Mesh: {}", input.display());
    if let Some(name) = &info.name {
        println!("  Name:           {}", name);
    }
    println!("  Vertices:       {}", info.vertices);
    println!("  Edges:          {}", info.edges);
    println!("  Faces:          {}", info.faces);
    println!("  UVs:            {}", if info.has_uvs { "yes" } else { "no" });
    println!();
    println!("Pattern:");
    println!("  Pieces:         {}", info.boundary_loops);
    println!("  Boundary edges: {}", info.boundary_edges);
    println!("  Wire edges:     {}", info.wire_edges);
    println!("  Seam edges:     {}", info.seam_edges);
    println!("  Detected seams: {}", info.detected_seams);

    Ok(())
}
