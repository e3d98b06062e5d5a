//! # seamstress
//!
//! Turn a UV-unwrapped mesh into a flat sewing pattern.
//!
//! Every island of the UV layout becomes a pattern piece outlined along its
//! boundary. Wire edges between islands say which points get sewn together;
//! each end of such an edge gets a short guide tick, and both ticks of one
//! edge share a color.
//!
//! ```text
//! load_mesh ─► export_pattern ─► DrawList ─► to_svg / PNG / JSON
//!                 │
//!                 ├─ detect_seams + apply_seams   (AUTO mode)
//!                 ├─ boundary_loop_groups
//!                 └─ group_markers
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod boundary;
pub mod config;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod io;
pub mod marker;
pub mod mesh;
pub mod pattern;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use boundary::{BoundaryLoopGroup, boundary_loop_groups, reconstruct_loops};
pub use config::{AlignmentMarkers, CanvasSize, ExportConfig, FileFormat, default_output_path, output_path};
pub use detect::{apply_seams, auto_mark_seams, detect_seams};
pub use error::{PatternError, Result};
pub use geometry::{Line, Point};
pub use io::{MeshFormat, load_mesh, save_mesh};
pub use marker::{Rgb, SeamMarker, group_markers};
pub use mesh::UvMesh;
pub use pattern::{DrawList, PatternStats, build_draw_list, export_pattern};
pub use svg::to_svg;
