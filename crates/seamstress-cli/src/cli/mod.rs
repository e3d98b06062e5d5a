//! CLI command implementations.
//!
//! - `export` - write the sewing pattern as SVG, PNG or JSON
//! - `info` - mesh counts, UV islands and seam statistics
//! - `detect` - list (and optionally save) detected sewing seams

pub mod config;
pub mod detect;
pub mod export;
pub mod info;
pub mod render;

pub use detect::cmd_detect;
pub use export::cmd_export;
pub use info::cmd_info;
