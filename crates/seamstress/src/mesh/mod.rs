//! Half-edge mesh with per-corner UV coordinates.
//!
//! [`UvMesh`] follows the vertex / edge / loop / face layout of a BMesh:
//!
//! - every **edge** is a single undirected element shared by all faces that
//!   use it, and keeps the list of loops bound to it
//! - every **loop** is one corner of one face: it starts at a vertex, knows
//!   the edge it runs along, the next loop around its face, and carries the
//!   UV coordinate of that corner
//! - an edge without loops is a **wire** edge; it has no face and only
//!   records that its two endpoints belong together
//!
//! Edges carry a mutable `seam` flag. Everything else is append-only: the
//! pattern pipeline reads topology and never moves vertices or faces.
//!
//! ```
//! use seamstress::mesh::UvMesh;
//! use seamstress::Point;
//!
//! let mut mesh = UvMesh::new();
//! let a = mesh.add_vertex([0.0, 0.0, 0.0]);
//! let b = mesh.add_vertex([1.0, 0.0, 0.0]);
//! let c = mesh.add_vertex([0.0, 1.0, 0.0]);
//! mesh.add_face(&[a, b, c], &[
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(0.0, 1.0),
//! ]).unwrap();
//!
//! assert_eq!(mesh.num_edges(), 3);
//! assert_eq!(mesh.boundary_loops().len(), 3);
//! ```

mod index;

use std::collections::{BTreeSet, HashMap};

use crate::error::{PatternError, Result};
use crate::geometry::Point;

pub use index::{EdgeId, FaceId, LoopId, VertexId};

/// A mesh vertex.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// 3-D position. Only carried through; the pattern is built from UVs.
    pub position: [f64; 3],
    /// Incident edges in creation order.
    edges: Vec<EdgeId>,
}

impl Vertex {
    /// Incident edges in creation order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// An undirected mesh edge.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Endpoints in creation order.
    pub verts: [VertexId; 2],
    /// Whether the edge is marked as a cut / sewing seam.
    pub seam: bool,
    loops: Vec<LoopId>,
}

impl Edge {
    /// Loops bound to this edge, one per adjacent face.
    pub fn loops(&self) -> &[LoopId] {
        &self.loops
    }

    /// Number of faces using this edge.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.loops.len()
    }

    /// An edge with no adjacent face.
    #[inline]
    pub fn is_wire(&self) -> bool {
        self.loops.is_empty()
    }

    /// An edge with exactly one adjacent face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.loops.len() == 1
    }
}

/// One corner of a face.
#[derive(Debug, Clone, Copy)]
pub struct Loop {
    /// Vertex the loop starts at.
    pub vert: VertexId,
    /// Edge from `vert` to the next loop's vertex.
    pub edge: EdgeId,
    /// Face owning this corner.
    pub face: FaceId,
    /// Next corner around the same face.
    pub next: LoopId,
    /// UV coordinate of this corner.
    pub uv: Point,
}

/// A polygonal face.
#[derive(Debug, Clone)]
pub struct Face {
    loops: Vec<LoopId>,
    has_uvs: bool,
}

impl Face {
    /// Corners in winding order.
    pub fn loops(&self) -> &[LoopId] {
        &self.loops
    }

    /// Whether the face was given UV coordinates.
    pub fn has_uvs(&self) -> bool {
        self.has_uvs
    }
}

/// A polygon mesh with BMesh-style adjacency and a single UV layer.
#[derive(Debug, Clone, Default)]
pub struct UvMesh {
    name: Option<String>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    loops: Vec<Loop>,
    faces: Vec<Face>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    faces_without_uvs: usize,
}

impl UvMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with a name (used for default output file names).
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    // ==================== Construction ====================

    /// Append a vertex.
    pub fn add_vertex(&mut self, position: [f64; 3]) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex {
            position,
            edges: Vec::new(),
        });
        id
    }

    /// Get the edge between `a` and `b`, creating a wire edge if none exists.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(PatternError::DegenerateEdge { vertex: a.index() });
        }

        let key = edge_key(a, b);
        if let Some(&edge) = self.edge_lookup.get(&key) {
            return Ok(edge);
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            verts: [a, b],
            seam: false,
            loops: Vec::new(),
        });
        self.edge_lookup.insert(key, id);
        self.vertices[a.index()].edges.push(id);
        self.vertices[b.index()].edges.push(id);
        Ok(id)
    }

    /// Append a face through `verts` (in winding order).
    ///
    /// `uvs` holds one coordinate per corner. Passing an empty slice adds
    /// the face without UVs, which makes [`has_uvs`](Self::has_uvs) false.
    pub fn add_face(&mut self, verts: &[VertexId], uvs: &[Point]) -> Result<FaceId> {
        let face_index = self.faces.len();
        if verts.len() < 3 {
            return Err(PatternError::DegenerateFace {
                face: face_index,
                reason: "fewer than three corners",
            });
        }
        if !uvs.is_empty() && uvs.len() != verts.len() {
            return Err(PatternError::UvCountMismatch {
                face: face_index,
                corners: verts.len(),
                uvs: uvs.len(),
            });
        }
        for &v in verts {
            self.check_vertex(v)?;
        }
        let distinct: BTreeSet<VertexId> = verts.iter().copied().collect();
        if distinct.len() != verts.len() {
            return Err(PatternError::DegenerateFace {
                face: face_index,
                reason: "repeated vertex",
            });
        }

        let face = FaceId::new(face_index);
        let first = self.loops.len();
        let n = verts.len();
        let mut corner_loops = Vec::with_capacity(n);

        for i in 0..n {
            let (a, b) = (verts[i], verts[(i + 1) % n]);
            let edge = self.add_edge(a, b)?;
            let id = LoopId::new(first + i);
            self.loops.push(Loop {
                vert: a,
                edge,
                face,
                next: LoopId::new(first + (i + 1) % n),
                uv: uvs.get(i).copied().unwrap_or_default(),
            });
            self.edges[edge.index()].loops.push(id);
            corner_loops.push(id);
        }

        if uvs.is_empty() {
            self.faces_without_uvs += 1;
        }
        self.faces.push(Face {
            loops: corner_loops,
            has_uvs: !uvs.is_empty(),
        });
        Ok(face)
    }

    /// Set or clear the seam flag of an edge.
    pub fn set_seam(&mut self, edge: EdgeId, seam: bool) {
        self.edges[edge.index()].seam = seam;
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(PatternError::InvalidVertex { vertex: v.index() })
        }
    }

    // ==================== Accessors ====================

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has faces and every face carries UVs.
    pub fn has_uvs(&self) -> bool {
        !self.faces.is_empty() && self.faces_without_uvs == 0
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a loop (face corner) by ID.
    #[inline]
    pub fn face_loop(&self, id: LoopId) -> &Loop {
        &self.loops[id.index()]
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Look up the edge between two vertices.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.vertices.len()).map(VertexId::new)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len()).map(EdgeId::new)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + use<> {
        (0..self.faces.len()).map(FaceId::new)
    }

    // ==================== Topology queries ====================

    /// Edges incident to a vertex.
    #[inline]
    pub fn vertex_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.index()].edges
    }

    /// UV coordinate of a loop.
    #[inline]
    pub fn uv(&self, l: LoopId) -> Point {
        self.loops[l.index()].uv
    }

    /// Vertex the loop's edge leads to (`link_loop_next.vert`).
    #[inline]
    pub fn loop_end_vert(&self, l: LoopId) -> VertexId {
        let next = self.loops[l.index()].next;
        self.loops[next.index()].vert
    }

    /// The first loop of every boundary edge, in edge order.
    pub fn boundary_loops(&self) -> Vec<LoopId> {
        self.edges
            .iter()
            .filter(|e| e.is_boundary())
            .map(|e| e.loops[0])
            .collect()
    }

    /// Vertices touched by at least one boundary edge, in ascending order.
    pub fn boundary_vertices(&self) -> BTreeSet<VertexId> {
        self.edges
            .iter()
            .filter(|e| e.is_boundary())
            .flat_map(|e| e.verts)
            .collect()
    }

    /// Number of incident edges with at least one face.
    pub fn face_edge_count(&self, v: VertexId) -> usize {
        self.vertex_edges(v)
            .iter()
            .filter(|&&e| !self.edge(e).is_wire())
            .count()
    }

    /// Edges without any face.
    pub fn wire_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_ids().filter(|&e| self.edge(e).is_wire())
    }

    /// Edges currently flagged as seams.
    pub fn seam_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_ids().filter(|&e| self.edge(e).seam)
    }
}

/// Order-independent key for the edge lookup.
#[inline]
fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Unit square quad with UVs on the unit square, counter-clockwise.
    pub(crate) fn unit_quad() -> UvMesh {
        let mut mesh = UvMesh::with_name("quad");
        let v: Vec<VertexId> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .map(|p| mesh.add_vertex([p[0], p[1], 0.0]))
            .collect();
        mesh.add_face(
            &v,
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        )
        .unwrap();
        mesh
    }

    /// Two separate squares in UV space joined by one wire edge between
    /// vertex 1 (right-bottom of the left square) and vertex 4
    /// (left-bottom of the right square).
    pub(crate) fn linked_squares() -> (UvMesh, EdgeId) {
        let mut mesh = UvMesh::with_name("linked");
        let left = [(0.1, 0.1), (0.4, 0.1), (0.4, 0.4), (0.1, 0.4)];
        let right = [(0.6, 0.1), (0.9, 0.1), (0.9, 0.4), (0.6, 0.4)];
        for square in [left, right] {
            let verts: Vec<VertexId> = square
                .iter()
                .map(|&(x, y)| mesh.add_vertex([x, y, 0.0]))
                .collect();
            let uvs: Vec<Point> = square.iter().map(|&(x, y)| Point::new(x, y)).collect();
            mesh.add_face(&verts, &uvs).unwrap();
        }
        let wire = mesh.add_edge(VertexId::new(1), VertexId::new(4)).unwrap();
        (mesh, wire)
    }

    #[test]
    fn quad_topology() {
        let mesh = unit_quad();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_loops(), 4);
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.has_uvs());
        for e in mesh.edge_ids() {
            assert!(mesh.edge(e).is_boundary());
        }
        assert_eq!(mesh.boundary_vertices().len(), 4);
    }

    #[test]
    fn shared_edge_has_two_loops() {
        let mut mesh = UvMesh::new();
        let v: Vec<VertexId> = (0..4).map(|i| mesh.add_vertex([i as f64, 0.0, 0.0])).collect();
        let uv = [Point::default(); 3];
        mesh.add_face(&[v[0], v[1], v[2]], &uv).unwrap();
        mesh.add_face(&[v[0], v[2], v[3]], &uv).unwrap();

        let shared = mesh.find_edge(v[2], v[0]).unwrap();
        assert_eq!(mesh.edge(shared).face_count(), 2);
        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.boundary_loops().len(), 4);
    }

    #[test]
    fn loop_next_cycles_around_face() {
        let mesh = unit_quad();
        let l0 = mesh.face(FaceId::new(0)).loops()[0];
        assert_eq!(mesh.loop_end_vert(l0), VertexId::new(1));
        let mut l = l0;
        for _ in 0..4 {
            l = mesh.face_loop(l).next;
        }
        assert_eq!(l, l0);
    }

    #[test]
    fn wire_edge_counts() {
        let (mesh, wire) = linked_squares();
        assert!(mesh.edge(wire).is_wire());
        assert_eq!(mesh.wire_edges().collect::<Vec<_>>(), vec![wire]);
        assert_eq!(mesh.face_edge_count(VertexId::new(1)), 2);
        assert_eq!(mesh.vertex_edges(VertexId::new(1)).len(), 3);
        assert_eq!(mesh.edge(wire).verts, [VertexId::new(1), VertexId::new(4)]);
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut mesh = unit_quad();
        let e = mesh.add_edge(VertexId::new(1), VertexId::new(0)).unwrap();
        assert_eq!(e, EdgeId::new(0));
        assert_eq!(mesh.num_edges(), 4);
    }

    #[test]
    fn rejects_bad_faces() {
        let mut mesh = UvMesh::new();
        let a = mesh.add_vertex([0.0; 3]);
        let b = mesh.add_vertex([1.0, 0.0, 0.0]);
        assert!(matches!(
            mesh.add_face(&[a, b], &[]),
            Err(PatternError::DegenerateFace { .. })
        ));
        assert!(matches!(
            mesh.add_face(&[a, b, a], &[]),
            Err(PatternError::DegenerateFace { .. })
        ));
        assert!(matches!(
            mesh.add_face(&[a, b, VertexId::new(9)], &[]),
            Err(PatternError::InvalidVertex { vertex: 9 })
        ));
        assert!(matches!(
            mesh.add_face(&[a, b, a], &[Point::default()]),
            Err(PatternError::UvCountMismatch { .. })
        ));
        assert!(matches!(
            mesh.add_edge(a, a),
            Err(PatternError::DegenerateEdge { vertex: 0 })
        ));
        assert_eq!(mesh.num_faces(), 0);
    }

    #[test]
    fn face_without_uvs_clears_flag() {
        let mut mesh = unit_quad();
        let extra = mesh.add_vertex([2.0, 0.0, 0.0]);
        mesh.add_face(&[VertexId::new(1), extra, VertexId::new(2)], &[])
            .unwrap();
        assert!(!mesh.has_uvs());
        assert!(!UvMesh::new().has_uvs());
    }
}
