//! Automatic sewing-seam detection.
//!
//! A wire edge hanging off the boundary of an unwrapped mesh records that
//! its two endpoints are sewn together. Detection finds those wire edges
//! and marks them as seams, in two steps so the search stays testable on
//! its own:
//!
//! 1. [`detect_seams`] inspects topology and returns the edges to mark
//! 2. [`apply_seams`] writes the seam flags

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::mesh::{EdgeId, UvMesh};

/// Find wire edges that should be marked as sewing seams.
///
/// For each boundary vertex, count the incident edges that have at least
/// one face. Exactly two means the vertex is a plain point on a single
/// boundary contour, and every wire edge touching it is selected. Any other
/// count is a junction of several boundary strands and is skipped.
pub fn detect_seams(mesh: &UvMesh) -> BTreeSet<EdgeId> {
    let mut seams = BTreeSet::new();

    for v in mesh.boundary_vertices() {
        let face_edges = mesh.face_edge_count(v);
        if face_edges != 2 {
            trace!("Skipping junction vertex {:?} ({} face edges)", v, face_edges);
            continue;
        }

        seams.extend(
            mesh.vertex_edges(v)
                .iter()
                .copied()
                .filter(|&e| mesh.edge(e).is_wire()),
        );
    }

    debug!("Detected {} seam edges", seams.len());
    seams
}

/// Set the seam flag on every edge in `seams`.
///
/// Returns how many edges changed from unmarked to marked.
pub fn apply_seams(mesh: &mut UvMesh, seams: &BTreeSet<EdgeId>) -> usize {
    let mut changed = 0;
    for &e in seams {
        if !mesh.edge(e).seam {
            mesh.set_seam(e, true);
            changed += 1;
        }
    }
    changed
}

/// Detect and apply in one call. Returns the detected set.
pub fn auto_mark_seams(mesh: &mut UvMesh) -> BTreeSet<EdgeId> {
    let seams = detect_seams(mesh);
    let changed = apply_seams(mesh, &seams);
    debug!("Marked {} new seam edges", changed);
    seams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::mesh::tests::{linked_squares, unit_quad};
    use crate::mesh::VertexId;

    #[test]
    fn quad_without_wires_detects_nothing() {
        let mesh = unit_quad();
        assert!(detect_seams(&mesh).is_empty());
    }

    #[test]
    fn wire_at_simple_corner_is_detected() {
        let (mut mesh, wire) = linked_squares();
        assert!(!mesh.edge(wire).seam);

        let seams = detect_seams(&mesh);
        assert_eq!(seams.into_iter().collect::<Vec<_>>(), vec![wire]);
        assert!(!mesh.edge(wire).seam, "detection alone must not mutate");

        auto_mark_seams(&mut mesh);
        assert!(mesh.edge(wire).seam);
        assert_eq!(mesh.face_edge_count(VertexId::new(1)), 2);
        assert_eq!(mesh.face_edge_count(VertexId::new(4)), 2);
    }

    #[test]
    fn junction_vertex_is_skipped() {
        // Fan of two triangles around vertex 0: it has three face edges
        // (0-1, 0-2, 0-3) and sits on the boundary.
        let mut mesh = UvMesh::new();
        let v: Vec<VertexId> = (0..5).map(|i| mesh.add_vertex([i as f64, 0.0, 0.0])).collect();
        let uv = [Point::default(); 3];
        mesh.add_face(&[v[0], v[1], v[2]], &uv).unwrap();
        mesh.add_face(&[v[0], v[2], v[3]], &uv).unwrap();
        let wire = mesh.add_edge(v[0], v[4]).unwrap();

        assert_eq!(mesh.face_edge_count(v[0]), 3);
        let seams = detect_seams(&mesh);
        assert!(!seams.contains(&wire));

        apply_seams(&mut mesh, &seams);
        assert!(!mesh.edge(wire).seam);
    }

    #[test]
    fn apply_counts_only_new_marks() {
        let (mut mesh, wire) = linked_squares();
        let seams = detect_seams(&mesh);
        assert_eq!(apply_seams(&mut mesh, &seams), 1);
        assert_eq!(apply_seams(&mut mesh, &seams), 0);
        assert!(mesh.edge(wire).seam);
    }

    #[test]
    fn face_edges_are_never_marked() {
        let (mut mesh, wire) = linked_squares();
        auto_mark_seams(&mut mesh);
        let marked: Vec<EdgeId> = mesh.seam_edges().collect();
        assert_eq!(marked, vec![wire]);
    }
}
