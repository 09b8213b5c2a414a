//! Core value types for dice customization.

use crate::errors::DiceError;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceType {
    D4,
    #[default]
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DiceType {
    /// Every supported die type, in ascending face count.
    pub const ALL: [DiceType; 6] = [
        DiceType::D4,
        DiceType::D6,
        DiceType::D8,
        DiceType::D10,
        DiceType::D12,
        DiceType::D20,
    ];

    /// Number of faces on the physical die.
    pub fn face_count(&self) -> usize {
        match self {
            DiceType::D4 => 4,
            DiceType::D6 => 6,
            DiceType::D8 => 8,
            DiceType::D10 => 10,
            DiceType::D12 => 12,
            DiceType::D20 => 20,
        }
    }

    /// Name of the solid the die is built from.
    pub fn name(&self) -> &'static str {
        match self {
            DiceType::D4 => "Tetrahedron",
            DiceType::D6 => "Cube",
            DiceType::D8 => "Octahedron",
            DiceType::D10 => "Decahedron",
            DiceType::D12 => "Dodecahedron",
            DiceType::D20 => "Icosahedron",
        }
    }

    /// Short label such as `D6`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiceType::D4 => "D4",
            DiceType::D6 => "D6",
            DiceType::D8 => "D8",
            DiceType::D10 => "D10",
            DiceType::D12 => "D12",
            DiceType::D20 => "D20",
        }
    }

    /// Whether the die is built as a subdivided grid that supports engraving.
    pub fn is_engravable(&self) -> bool {
        matches!(self, DiceType::D6)
    }

    /// Parse a die label, falling back to the cube for anything unrecognized.
    pub fn parse_or_default(label: &str) -> DiceType {
        label.parse().unwrap_or_else(|_| {
            warn!(label, "unrecognized dice type, falling back to D6");
            DiceType::default()
        })
    }
}

impl fmt::Display for DiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiceType {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DiceError::UnsupportedDiceType { name: s.to_string() })
    }
}

/// Export resolution. Scales the caller-side subdivision density only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Resolution {
    Low,
    #[default]
    Medium,
    High,
}

impl Resolution {
    /// Density multiplier applied to the base grid subdivision.
    pub fn multiplier(&self) -> u32 {
        match self {
            Resolution::Low => 1,
            Resolution::Medium => 2,
            Resolution::High => 4,
        }
    }
}

/// Recognized export options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ExportOptions {
    /// Subdivision density of the exported die.
    pub resolution: Resolution,
    /// Binary STL when true, ASCII STL otherwise.
    pub binary: bool,
    /// Whether engravings are kept in the exported geometry.
    pub include_displacement: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            resolution: Resolution::Medium,
            binary: true,
            include_displacement: true,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Select ASCII STL output.
    pub fn ascii(mut self) -> Self {
        self.binary = false;
        self
    }

    pub fn with_displacement(mut self, include: bool) -> Self {
        self.include_displacement = include;
        self
    }
}

/// A request to engrave one face of a die.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EngravingRequest {
    /// Face to engrave, in the builder's face order.
    pub face_index: usize,
    /// Maximum displacement in mesh units.
    pub strength: f32,
}

impl EngravingRequest {
    /// Default engraving depth used by the customization panel.
    pub const DEFAULT_STRENGTH: f32 = 0.3;

    pub fn new(face_index: usize, strength: f32) -> Self {
        Self { face_index, strength }
    }
}

impl Default for EngravingRequest {
    fn default() -> Self {
        Self {
            face_index: 0,
            strength: Self::DEFAULT_STRENGTH,
        }
    }
}
