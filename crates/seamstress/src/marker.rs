//! Sewing-guide markers: offset direction and color per seam corner.
//!
//! A wire edge flagged as a seam connects two boundary corners. Each corner
//! gets a short colored tick across the pattern outline; both ticks of one
//! wire edge share a color, so a user can find the matching edge on the
//! other piece.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::boundary::BoundaryLoopGroup;
use crate::geometry::Point;
use crate::mesh::{EdgeId, LoopId, UvMesh};

/// Half-length of a marker tick, as a fraction of the unit UV square.
pub const MARKER_OFFSET: f64 = 0.01;

/// Hash values are folded into `0..=HASH_RANGE` before becoming a hue.
const HASH_RANGE: u64 = 100_000_000;

/// Multiplier that spreads neighbouring hash values across the hue circle.
const HUE_SPREAD: f64 = 1_345_235.235_23;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from channels in `[0, 1]`, truncating (not rounding) to 8 bits.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        // `as u8` saturates, so out-of-range input clamps to 0 / 255
        Self::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// `#rrggbb` in lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Raw channel triple for raster output.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A sewing guide at one boundary corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamMarker {
    /// Boundary corner the guide is drawn at.
    pub corner: LoopId,
    /// Wire edge the guide belongs to.
    pub wire: EdgeId,
    /// UV coordinate of the corner.
    pub anchor: Point,
    /// Offset in image orientation; the tick runs from `anchor + offset`
    /// to `anchor - offset` after the y flip.
    pub offset: Point,
    pub color: Rgb,
}

/// Offset direction for a guide drawn at `corner`.
///
/// Sums, over every edge at the corner's vertex that borders exactly one
/// face, the negated UV vector from that edge's first loop to the loop
/// after it. The sign is the same whichever endpoint the loop starts at;
/// the result approximates the bisector of the two boundary edges without
/// being one.
///
/// The unit sum is mirrored into image orientation (y flipped), its axes
/// swapped, and scaled by [`MARKER_OFFSET`]. Returns `None` when the sum
/// vanishes.
pub fn marker_direction(mesh: &UvMesh, corner: LoopId) -> Option<Point> {
    let vert = mesh.face_loop(corner).vert;
    let mut dir = Point::default();

    for &e in mesh.vertex_edges(vert) {
        let edge = mesh.edge(e);
        if !edge.is_boundary() {
            continue;
        }
        let l0 = edge.loops()[0];
        let next = mesh.face_loop(l0).next;
        dir -= mesh.uv(l0) - mesh.uv(next);
    }

    let unit = dir.normalized()?;
    let flipped = Point::new(unit.x, -unit.y);
    Some(Point::new(flipped.y, flipped.x).scale(MARKER_OFFSET))
}

/// Stable hash of an edge's identity.
///
/// Built from the sorted endpoint ids, so it does not depend on endpoint
/// order, memory addresses or process state.
pub fn edge_hash(mesh: &UvMesh, edge: EdgeId) -> u64 {
    let [a, b] = mesh.edge(edge).verts;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    mix64(((lo.raw() as u64) << 32) | hi.raw() as u64)
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Map a hash to a hue in `[0, 1)`.
pub fn hash_hue(hash: u64) -> f64 {
    let folded = (hash % (HASH_RANGE + 1)) as f64 / HASH_RANGE as f64;
    (folded * HUE_SPREAD) % 1.0
}

/// Convert HSV (each in `[0, 1]`) to RGB channels in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s <= 0.0 {
        return (v, v, v);
    }

    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Fully saturated color for a hash value.
pub fn hash_color(hash: u64) -> Rgb {
    let (r, g, b) = hsv_to_rgb(hash_hue(hash), 1.0, 1.0);
    Rgb::from_unit(r, g, b)
}

/// Guide color for a wire edge. Identical for both of its corners.
pub fn seam_color(mesh: &UvMesh, wire: EdgeId) -> Rgb {
    hash_color(edge_hash(mesh, wire))
}

/// Build the marker for one (corner, wire edge) pair.
pub fn seam_marker(mesh: &UvMesh, corner: LoopId, wire: EdgeId) -> Option<SeamMarker> {
    let Some(offset) = marker_direction(mesh, corner) else {
        warn!(
            "No marker direction at corner {:?} for wire edge {:?}; skipping",
            corner, wire
        );
        return None;
    };

    Some(SeamMarker {
        corner,
        wire,
        anchor: mesh.uv(corner),
        offset,
        color: seam_color(mesh, wire),
    })
}

/// Markers for every corner of `group` touching a wire edge flagged as seam.
pub fn group_markers(mesh: &UvMesh, group: &BoundaryLoopGroup) -> Vec<SeamMarker> {
    let mut markers = Vec::new();
    for &corner in group.distinct_loops() {
        let vert = mesh.face_loop(corner).vert;
        for &e in mesh.vertex_edges(vert) {
            let edge = mesh.edge(e);
            if edge.is_wire() && edge.seam {
                markers.extend(seam_marker(mesh, corner, e));
            }
        }
    }
    markers
}
