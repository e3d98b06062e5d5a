//! JSON mesh documents.
//!
//! ```json
//! {
//!   "name": "Shirt",
//!   "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
//!   "faces": [{ "verts": [0, 1, 2], "uvs": [[0, 0], [1, 0], [0, 1]] }],
//!   "edges": [{ "verts": [1, 2], "seam": true }]
//! }
//! ```
//!
//! `edges` lists wire edges and seam-flagged edges only; face edges are
//! implied by the faces. Indices are 0-based.

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, Result};
use crate::geometry::Point;
use crate::mesh::{UvMesh, VertexId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertices: Vec<[f64; 3]>,
    #[serde(default)]
    pub faces: Vec<FaceRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRecord {
    pub verts: Vec<usize>,
    /// One `[u, v]` per corner, or empty for a face without UVs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uvs: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub verts: [usize; 2],
    #[serde(default)]
    pub seam: bool,
}

impl MeshDocument {
    /// Snapshot a mesh.
    pub fn from_mesh(mesh: &UvMesh) -> Self {
        let vertices = mesh
            .vertex_ids()
            .map(|v| mesh.vertex(v).position)
            .collect();

        let faces = mesh
            .face_ids()
            .map(|f| {
                let face = mesh.face(f);
                let verts = face
                    .loops()
                    .iter()
                    .map(|&l| mesh.face_loop(l).vert.index())
                    .collect();
                let uvs = if face.has_uvs() {
                    face.loops()
                        .iter()
                        .map(|&l| {
                            let uv = mesh.uv(l);
                            [uv.x, uv.y]
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                FaceRecord { verts, uvs }
            })
            .collect();

        let edges = mesh
            .edge_ids()
            .filter(|&e| mesh.edge(e).is_wire() || mesh.edge(e).seam)
            .map(|e| {
                let edge = mesh.edge(e);
                EdgeRecord {
                    verts: [edge.verts[0].index(), edge.verts[1].index()],
                    seam: edge.seam,
                }
            })
            .collect();

        Self {
            name: mesh.name().map(str::to_string),
            vertices,
            faces,
            edges,
        }
    }

    /// Build the mesh this document describes.
    pub fn to_mesh(&self) -> Result<UvMesh> {
        let mut mesh = match &self.name {
            Some(name) => UvMesh::with_name(name.clone()),
            None => UvMesh::new(),
        };

        for &position in &self.vertices {
            mesh.add_vertex(position);
        }

        for face in &self.faces {
            let verts = face
                .verts
                .iter()
                .map(|&v| self.vertex_ref(v))
                .collect::<Result<Vec<_>>>()?;
            let uvs: Vec<Point> = face.uvs.iter().map(|&[u, v]| Point::new(u, v)).collect();
            mesh.add_face(&verts, &uvs)?;
        }

        for edge in &self.edges {
            let id = mesh.add_edge(self.vertex_ref(edge.verts[0])?, self.vertex_ref(edge.verts[1])?)?;
            if edge.seam {
                mesh.set_seam(id, true);
            }
        }

        Ok(mesh)
    }

    /// Check a raw index before it becomes an id; ids are 32-bit.
    fn vertex_ref(&self, index: usize) -> Result<VertexId> {
        if index < self.vertices.len() {
            Ok(VertexId::new(index))
        } else {
            Err(PatternError::InvalidVertex { vertex: index })
        }
    }
}

/// Parse a JSON mesh document.
pub fn parse_json(content: &str) -> Result<UvMesh> {
    let doc: MeshDocument = serde_json::from_str(content)?;
    doc.to_mesh()
}

/// Serialize a mesh as a pretty-printed JSON document.
pub fn to_json(mesh: &UvMesh) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MeshDocument::from_mesh(mesh))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::linked_squares;

    #[test]
    fn parses_documented_example() {
        let text = r#"{
            "name": "Shirt",
            "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [2, 2, 0]],
            "faces": [{ "verts": [0, 1, 2], "uvs": [[0, 0], [1, 0], [0, 1]] }],
            "edges": [{ "verts": [1, 3], "seam": true }, { "verts": [1, 2], "seam": true }]
        }"#;
        let mesh = parse_json(text).unwrap();
        assert_eq!(mesh.name(), Some("Shirt"));
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 4);
        assert!(mesh.has_uvs());
        assert_eq!(mesh.wire_edges().count(), 1);
        assert_eq!(mesh.seam_edges().count(), 2);
    }

    #[test]
    fn saved_document_keeps_seams_and_wires() {
        let (mut mesh, wire) = linked_squares();
        mesh.set_seam(wire, true);

        let reloaded = parse_json(&to_json(&mesh).unwrap()).unwrap();
        assert_eq!(reloaded.num_vertices(), 8);
        assert_eq!(reloaded.num_faces(), 2);
        assert_eq!(reloaded.num_edges(), mesh.num_edges());
        let edge = reloaded.find_edge(VertexId::new(1), VertexId::new(4)).unwrap();
        assert!(reloaded.edge(edge).is_wire());
        assert!(reloaded.edge(edge).seam);
    }

    #[test]
    fn faces_without_uvs_stay_without_uvs() {
        let text = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [{"verts": [0,1,2]}]}"#;
        let mesh = parse_json(text).unwrap();
        assert!(!mesh.has_uvs());
        let doc = MeshDocument::from_mesh(&mesh);
        assert!(doc.faces[0].uvs.is_empty());
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let text = r#"{"vertices": [[0,0,0],[1,0,0]], "faces": [{"verts": [0,1,5], "uvs": [[0,0],[1,0],[0,1]]}]}"#;
        assert!(matches!(parse_json(text), Err(PatternError::InvalidVertex { vertex: 5 })));
    }

    #[test]
    fn index_beyond_32_bits_is_rejected() {
        let text = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [{"verts": [4294967296,1,2], "uvs": [[0,0],[1,0],[0,1]]}]}"#;
        assert!(matches!(
            parse_json(text),
            Err(PatternError::InvalidVertex { vertex: 4_294_967_296 })
        ));

        let text = r#"{"vertices": [[0,0,0],[1,0,0]], "edges": [{"verts": [0, 4294967297]}]}"#;
        assert!(matches!(parse_json(text), Err(PatternError::InvalidVertex { .. })));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_json("{ not json"), Err(PatternError::Json(_))));
    }
}
