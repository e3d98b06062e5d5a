//! Sewing pattern assembly: from mesh to a flat draw list.
//!
//! [`export_pattern`] runs the whole pipeline for one export:
//!
//! 1. reject meshes without UVs
//! 2. in [`AlignmentMarkers::Auto`] mode, detect and mark sewing seams
//! 3. rebuild boundary contours
//! 4. map outlines and guide ticks from UV space to pixels
//!
//! The resulting [`DrawList`] holds nothing but pixel-space polylines and
//! colored segments; turning it into SVG, PNG or JSON is up to the caller.

use serde::Serialize;
use tracing::info;

use crate::boundary::boundary_loop_groups;
use crate::config::{AlignmentMarkers, CanvasSize, ExportConfig};
use crate::detect::auto_mark_seams;
use crate::error::{PatternError, Result};
use crate::geometry::{Line, Point, bounding_box};
use crate::marker::{Rgb, SeamMarker, group_markers};
use crate::mesh::UvMesh;

/// Maps UV coordinates onto the canvas.
///
/// UV space has y pointing up, image space has y pointing down, so v is
/// flipped: `x = u * width`, `y = (1 - v) * height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pub width: f64,
    pub height: f64,
}

impl CanvasMapping {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            width: size.width as f64,
            height: size.height as f64,
        }
    }

    /// UV point to pixel point.
    #[inline]
    pub fn to_pixels(&self, uv: Point) -> Point {
        Point::new(uv.x * self.width, (1.0 - uv.y) * self.height)
    }

    /// Guide tick for a marker, in pixels.
    ///
    /// The offset is already in image orientation, so it is added after the
    /// v flip rather than flipped again.
    pub fn marker_segment(&self, marker: &SeamMarker) -> Line {
        let u = marker.anchor.x;
        let v = 1.0 - marker.anchor.y;
        let d = marker.offset;
        Line::new(
            (u + d.x) * self.width,
            (v + d.y) * self.height,
            (u - d.x) * self.width,
            (v - d.y) * self.height,
        )
    }
}

/// A colored guide tick in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerSegment {
    pub line: Line,
    pub color: Rgb,
}

/// One pattern piece: a closed outline and the guides drawn on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternPiece {
    /// Closed polyline; the last point repeats the first.
    pub outline: Vec<Point>,
    pub markers: Vec<MarkerSegment>,
}

/// Everything a renderer needs, in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub pieces: Vec<PatternPiece>,
}

impl DrawList {
    /// All outlines in drawing order.
    pub fn polylines(&self) -> impl Iterator<Item = &[Point]> {
        self.pieces.iter().map(|p| p.outline.as_slice())
    }

    /// All guide ticks in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = &MarkerSegment> {
        self.pieces.iter().flat_map(|p| p.markers.iter())
    }

    pub fn stats(&self) -> PatternStats {
        PatternStats::from_draw_list(self)
    }
}

/// Summary numbers for a draw list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternStats {
    pub pieces: usize,
    pub outline_points: usize,
    pub markers: usize,
    /// Pixel bounds of all outlines as (min_x, min_y, max_x, max_y)
    pub bounds: Option<(f64, f64, f64, f64)>,
}

impl PatternStats {
    pub fn from_draw_list(list: &DrawList) -> Self {
        let points: Vec<Point> = list.polylines().flat_map(|p| p.iter().copied()).collect();
        Self {
            pieces: list.pieces.len(),
            outline_points: points.len(),
            markers: list.segments().count(),
            bounds: bounding_box(&points),
        }
    }
}

/// Build the draw list from the mesh's current seam flags.
///
/// Never mutates the mesh; see [`export_pattern`] for the full pipeline.
pub fn build_draw_list(mesh: &UvMesh, size: CanvasSize, markers: AlignmentMarkers) -> DrawList {
    let mapping = CanvasMapping::new(size);
    let mut pieces = Vec::new();

    for group in boundary_loop_groups(mesh) {
        if group.is_empty() {
            continue;
        }

        let outline = group
            .loops()
            .iter()
            .map(|&l| mapping.to_pixels(mesh.uv(l)))
            .collect();

        let markers = if markers.draws_markers() {
            group_markers(mesh, &group)
                .iter()
                .map(|m| MarkerSegment {
                    line: mapping.marker_segment(m),
                    color: m.color,
                })
                .collect()
        } else {
            Vec::new()
        };

        pieces.push(PatternPiece { outline, markers });
    }

    DrawList {
        width: size.width,
        height: size.height,
        pieces,
    }
}

/// Run the full export pipeline for one mesh.
///
/// In [`AlignmentMarkers::Auto`] mode the detected seams stay marked on the
/// mesh afterwards.
pub fn export_pattern(mesh: &mut UvMesh, config: &ExportConfig) -> Result<DrawList> {
    if !mesh.has_uvs() {
        return Err(PatternError::MissingUvs);
    }

    if config.alignment_markers == AlignmentMarkers::Auto {
        auto_mark_seams(mesh);
    }

    let list = build_draw_list(mesh, config.size, config.alignment_markers);
    let stats = list.stats();
    info!(
        "Pattern: {} pieces, {} outline points, {} markers ({}x{}, markers {})",
        stats.pieces,
        stats.outline_points,
        stats.markers,
        list.width,
        list.height,
        config.alignment_markers.name()
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::{linked_squares, unit_quad};

    fn config(mode: AlignmentMarkers) -> ExportConfig {
        ExportConfig {
            alignment_markers: mode,
            ..ExportConfig::default()
        }
    }

    #[test]
    fn uv_to_pixel_mapping() {
        let m = CanvasMapping::new(CanvasSize::new(1024, 1024));
        assert_eq!(m.to_pixels(Point::new(0.0, 0.0)), Point::new(0.0, 1024.0));
        assert_eq!(m.to_pixels(Point::new(1.0, 1.0)), Point::new(1024.0, 0.0));
        assert_eq!(m.to_pixels(Point::new(0.5, 0.5)), Point::new(512.0, 512.0));
    }

    #[test]
    fn marker_segment_straddles_anchor() {
        let m = CanvasMapping::new(CanvasSize::new(200, 100));
        let marker = SeamMarker {
            corner: crate::mesh::LoopId::new(0),
            wire: crate::mesh::EdgeId::new(0),
            anchor: Point::new(0.5, 0.25),
            offset: Point::new(0.01, 0.02),
            color: Rgb::BLACK,
        };
        let seg = m.marker_segment(&marker);
        assert!((seg.x1 - 102.0).abs() < 1e-9);
        assert!((seg.y1 - 77.0).abs() < 1e-9);
        assert!((seg.x2 - 98.0).abs() < 1e-9);
        assert!((seg.y2 - 73.0).abs() < 1e-9);
        assert!(seg.midpoint().distance(m.to_pixels(marker.anchor)) < 1e-9);
    }

    #[test]
    fn quad_exports_one_closed_outline_in_every_mode() {
        for &mode in AlignmentMarkers::all() {
            let mut mesh = unit_quad();
            let list = export_pattern(&mut mesh, &config(mode)).unwrap();

            assert_eq!(list.pieces.len(), 1, "mode {:?}", mode);
            let outline = &list.pieces[0].outline;
            assert_eq!(outline.len(), 5);
            assert_eq!(outline.first(), outline.last());
            assert_eq!(list.segments().count(), 0);
        }
    }

    #[test]
    fn quad_outline_corners_in_pixels() {
        let mut mesh = unit_quad();
        let list = export_pattern(&mut mesh, &config(AlignmentMarkers::Off)).unwrap();
        let outline = &list.pieces[0].outline;
        for corner in [
            Point::new(0.0, 1024.0),
            Point::new(1024.0, 1024.0),
            Point::new(1024.0, 0.0),
            Point::new(0.0, 0.0),
        ] {
            assert!(outline.contains(&corner), "missing corner {:?}", corner);
        }
    }

    #[test]
    fn linked_squares_auto_mode() {
        let (mut mesh, wire) = linked_squares();
        let list = export_pattern(&mut mesh, &config(AlignmentMarkers::Auto)).unwrap();

        assert!(mesh.edge(wire).seam, "auto mode marks the wire edge");
        assert_eq!(list.pieces.len(), 2);
        let segments: Vec<&MarkerSegment> = list.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].color, segments[1].color);
    }

    #[test]
    fn seam_mode_uses_existing_flags_only() {
        let (mut mesh, wire) = linked_squares();
        let list = export_pattern(&mut mesh, &config(AlignmentMarkers::Seam)).unwrap();
        assert_eq!(list.segments().count(), 0);
        assert!(!mesh.edge(wire).seam);

        mesh.set_seam(wire, true);
        let list = export_pattern(&mut mesh, &config(AlignmentMarkers::Seam)).unwrap();
        assert_eq!(list.segments().count(), 2);
    }

    #[test]
    fn off_mode_draws_no_markers_even_with_seams() {
        let (mut mesh, wire) = linked_squares();
        mesh.set_seam(wire, true);
        let list = export_pattern(&mut mesh, &config(AlignmentMarkers::Off)).unwrap();
        assert_eq!(list.segments().count(), 0);
    }

    #[test]
    fn mesh_without_uvs_is_rejected() {
        let mut mesh = UvMesh::new();
        assert!(matches!(
            export_pattern(&mut mesh, &ExportConfig::default()),
            Err(PatternError::MissingUvs)
        ));
    }

    #[test]
    fn stats_count_everything() {
        let (mut mesh, _) = linked_squares();
        let list = export_pattern(&mut mesh, &ExportConfig::default()).unwrap();
        let stats = list.stats();
        assert_eq!(stats.pieces, 2);
        assert_eq!(stats.outline_points, 10);
        assert_eq!(stats.markers, 2);
        let (min_x, _, max_x, _) = stats.bounds.unwrap();
        assert!(min_x > 0.0 && max_x < 1024.0);
    }

    #[test]
    fn draw_list_serializes_hex_colors() {
        let (mut mesh, _) = linked_squares();
        let list = export_pattern(&mut mesh, &ExportConfig::default()).unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("\"color\":\"#"));
        assert!(json.contains("\"width\":1024"));
    }
}
