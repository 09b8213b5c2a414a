//! Error types for the dice maker.

use crate::types::DiceType;
use thiserror::Error;

/// Top-level error type for the dice maker.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Unsupported dice type: {name}")]
    UnsupportedDiceType { name: String },

    #[error(transparent)]
    Engrave(#[from] EngraveError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Errors while engraving a face.
#[derive(Debug, Error, PartialEq)]
pub enum EngraveError {
    #[error("Invalid face index {face}: die has {available} engravable faces")]
    InvalidFaceIndex { face: usize, available: usize },

    #[error("Invalid face index {face}: {dice_type} has no per-face vertex groups")]
    NoFaceGroups { face: usize, dice_type: DiceType },

    #[error("Engraving strength must be finite and non-negative, got {strength}")]
    InvalidStrength { strength: f32 },

    #[error("Face group references vertex {index} but mesh has {vertex_count} vertices")]
    VertexOutOfRange { index: u32, vertex_count: usize },
}

impl EngraveError {
    /// True for every variant that reports a bad face selection.
    pub fn is_invalid_face(&self) -> bool {
        matches!(
            self,
            EngraveError::InvalidFaceIndex { .. } | EngraveError::NoFaceGroups { .. }
        )
    }
}

/// Errors while building or decoding a displacement map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Displacement map dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("Displacement map of {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Image decoding failed: {reason}")]
    Decode { reason: String },
}

/// Errors during STL export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Mesh does not have required vertex data")]
    MissingVertexData,

    #[error("Triangle {triangle} references vertex {index} but mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Mesh has {normals} normals for {positions} positions")]
    MismatchedNormals { positions: usize, normals: usize },

    #[error("Triangle count {count} does not fit the STL header")]
    TooManyTriangles { count: usize },

    #[error("Malformed STL data: {reason}")]
    Malformed { reason: String },

    #[error(transparent)]
    Engrave(#[from] EngraveError),
}
