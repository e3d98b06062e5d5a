//! Boundary loop reconstruction - chain boundary corners into closed contours.
//!
//! Every boundary edge contributes one loop: the corner of its single face
//! that starts the edge. Read as a directed arc `vert -> next.vert`, these
//! loops form disjoint cycles when the UV unwrap is a manifold with
//! boundary. This module recovers those cycles in drawing order.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::mesh::{LoopId, UvMesh, VertexId};

/// One closed boundary contour.
///
/// The first loop is repeated at the end, so drawing the corners in order
/// produces a closed polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLoopGroup {
    loops: Vec<LoopId>,
}

impl BoundaryLoopGroup {
    /// All loops including the closing repeat of the first one.
    pub fn loops(&self) -> &[LoopId] {
        &self.loops
    }

    /// Loops without the closing repeat; each boundary corner appears once.
    pub fn distinct_loops(&self) -> &[LoopId] {
        &self.loops[..self.loops.len().saturating_sub(1)]
    }

    /// Number of distinct boundary corners.
    pub fn len(&self) -> usize {
        self.distinct_loops().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }
}

/// Reconstruct the boundary contours of a mesh.
pub fn boundary_loop_groups(mesh: &UvMesh) -> Vec<BoundaryLoopGroup> {
    reconstruct_loops(mesh, &mesh.boundary_loops())
}

/// Group boundary loops into closed contours.
///
/// # Algorithm
///
/// 1. Index every arc by its start vertex and by its end vertex
/// 2. Start a group with the first unused loop; the cursor is its end vertex
/// 3. Take the earliest unused loop (in input order) that either ends at the
///    cursor (cursor moves to its start) or starts at the cursor (cursor
///    moves to its end); a loop matching both ways counts as ending there
/// 4. Repeat until nothing matches, then close the group
///
/// Arcs whose orientation disagrees with their neighbours (mixed face
/// winding) are still chained through the "ends at the cursor" rule.
///
/// # Performance
///
/// O(n) for manifold boundaries: every vertex touches exactly two arcs. A
/// vertex shared by more boundary arcs makes the choice ambiguous; the
/// earliest match wins and a warning is logged.
pub fn reconstruct_loops(mesh: &UvMesh, boundary: &[LoopId]) -> Vec<BoundaryLoopGroup> {
    if boundary.is_empty() {
        return Vec::new();
    }

    // vertex -> positions in `boundary`, ascending
    let mut by_start: HashMap<VertexId, Vec<usize>> = HashMap::new();
    let mut by_end: HashMap<VertexId, Vec<usize>> = HashMap::new();

    for (i, &l) in boundary.iter().enumerate() {
        by_start.entry(mesh.face_loop(l).vert).or_default().push(i);
        by_end.entry(mesh.loop_end_vert(l)).or_default().push(i);
    }

    let ambiguous = non_manifold_vertices(&by_start, &by_end);
    if ambiguous > 0 {
        warn!(
            "Boundary is non-manifold at {} vertices; loop matching is best effort",
            ambiguous
        );
    }

    let mut used = vec![false; boundary.len()];
    let mut groups = Vec::new();

    for start_idx in 0..boundary.len() {
        if used[start_idx] {
            continue;
        }

        used[start_idx] = true;
        let first = boundary[start_idx];
        let mut group = vec![first];
        let mut cursor = mesh.loop_end_vert(first);

        loop {
            let ends_here = first_unused(&by_end, cursor, &used);
            let starts_here = first_unused(&by_start, cursor, &used);

            let (idx, reversed) = match (ends_here, starts_here) {
                (Some(e), Some(s)) if s < e => (s, false),
                (Some(e), _) => (e, true),
                (None, Some(s)) => (s, false),
                (None, None) => break,
            };

            used[idx] = true;
            let l = boundary[idx];
            group.push(l);
            cursor = if reversed {
                mesh.face_loop(l).vert
            } else {
                mesh.loop_end_vert(l)
            };
        }

        group.push(first);
        groups.push(BoundaryLoopGroup { loops: group });
    }

    debug!(
        "Reconstructed {} boundary loop groups from {} boundary loops",
        groups.len(),
        boundary.len()
    );

    groups
}

/// Vertices touched by more than two boundary arcs.
///
/// Degree counts start and end hits together, so a manifold contour with
/// mixed face winding (two arcs ending at one vertex) still has degree 2.
fn non_manifold_vertices(
    by_start: &HashMap<VertexId, Vec<usize>>,
    by_end: &HashMap<VertexId, Vec<usize>>,
) -> usize {
    let degree = |v: &VertexId| {
        by_start.get(v).map_or(0, Vec::len) + by_end.get(v).map_or(0, Vec::len)
    };
    let mut verts: Vec<&VertexId> = by_start.keys().chain(by_end.keys()).collect();
    verts.sort();
    verts.dedup();
    verts.into_iter().filter(|&v| degree(v) > 2).count()
}

/// Earliest unused arc in a vertex bucket.
#[inline]
fn first_unused(index: &HashMap<VertexId, Vec<usize>>, v: VertexId, used: &[bool]) -> Option<usize> {
    index
        .get(&v)
        .and_then(|bucket| bucket.iter().copied().find(|&i| !used[i]))
}

/// Statistics about reconstructed groups.
#[derive(Debug, Clone)]
pub struct LoopStats {
    /// Number of input boundary loops
    pub boundary_loops: usize,
    /// Number of closed groups
    pub groups: usize,
    /// Distinct corners in the largest group
    pub max_group_len: usize,
}

impl LoopStats {
    pub fn from_groups(input_count: usize, groups: &[BoundaryLoopGroup]) -> Self {
        Self {
            boundary_loops: input_count,
            groups: groups.len(),
            max_group_len: groups.iter().map(|g| g.len()).max().unwrap_or(0),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
