//! Error types for seamstress.
//!
//! The geometric core degrades gracefully and never fails on manifold,
//! UV-present input. Errors come from the edges of the system: building or
//! loading a mesh, validating configuration, and writing documents.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`PatternError`].
pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors that can occur while preparing or exporting a sewing pattern.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The mesh has no UV layer (or no faces to carry one).
    #[error("mesh has no UV coordinates")]
    MissingUvs,

    /// Canvas size outside the supported range.
    #[error("invalid canvas size {width}x{height} (each side must be in {min}..={max})")]
    InvalidSize {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    /// A face or edge references a vertex that does not exist.
    #[error("reference to invalid vertex index {vertex}")]
    InvalidVertex { vertex: usize },

    /// A face with fewer than three corners or a repeated vertex.
    #[error("face {face} is degenerate: {reason}")]
    DegenerateFace { face: usize, reason: &'static str },

    /// An edge whose two endpoints are the same vertex.
    #[error("edge at vertex {vertex} connects the vertex to itself")]
    DegenerateEdge { vertex: usize },

    /// Number of UV coordinates does not match the number of face corners.
    #[error("face {face} has {corners} corners but {uvs} UV coordinates")]
    UvCountMismatch {
        face: usize,
        corners: usize,
        uvs: usize,
    },

    /// File extension not recognised as a mesh or output format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Malformed mesh file content.
    #[error("failed to parse {path}, line {line}: {details}")]
    Parse {
        path: PathBuf,
        line: usize,
        details: String,
    },

    /// File I/O error with the offending path.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The SVG writer failed.
    #[error("failed to write SVG: {0}")]
    Svg(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatternError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatternError::Io {
            path: path.into(),
            source,
        }
    }
}
