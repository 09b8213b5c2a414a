//! Die mesh construction.
//!
//! This crate provides:
//! - The triangle mesh type shared by engraving and export
//! - Subdivided cube grids with per-face vertex groups (D6)
//! - Coarse regular polyhedra for the other dice
//! - Flat-shading conversion

mod cube;
mod mesh;
mod polyhedron;

pub use cube::{build_cube_grid, FaceFrame, FaceVertexGroup, CUBE_FACES};
pub use mesh::{triangle_normal, BoundingBox, Mesh};
pub use polyhedron::Polyhedron;

use dice_core::{DiceType, Resolution};
use tracing::debug;

/// Subdivisions per cube face edge at the lowest resolution.
pub const DEFAULT_GRID: u32 = 16;

/// Geometry construction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryOptions {
    /// Subdivisions per cube face edge.
    pub grid: u32,
    /// Cube edge length.
    pub size: f32,
    /// Circumscribed radius of the non-cube polyhedra.
    pub polyhedron_radius: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            size: 2.0,
            polyhedron_radius: 1.5,
        }
    }
}

impl GeometryOptions {
    /// Options with the cube grid scaled for an export resolution.
    pub fn for_resolution(resolution: Resolution) -> Self {
        Self {
            grid: DEFAULT_GRID * resolution.multiplier(),
            ..Default::default()
        }
    }

    pub fn with_grid(mut self, grid: u32) -> Self {
        self.grid = grid;
        self
    }
}

/// A built die: its mesh plus the face groups engraving needs.
#[derive(Debug, Clone)]
pub struct DieMesh {
    pub dice_type: DiceType,
    pub options: GeometryOptions,
    pub mesh: Mesh,
    /// Present only for grid-subdivided dice.
    pub faces: Option<FaceVertexGroup>,
}

impl DieMesh {
    /// Rebuild the untouched base mesh this die started from.
    pub fn rebuild(&self) -> DieMesh {
        build_mesh_with_options(self.dice_type, &self.options)
    }
}

/// Build the mesh for a die type with default options.
pub fn build_mesh(dice_type: DiceType) -> DieMesh {
    build_mesh_with_options(dice_type, &GeometryOptions::default())
}

/// Build the mesh for a die type.
pub fn build_mesh_with_options(dice_type: DiceType, options: &GeometryOptions) -> DieMesh {
    let (mesh, faces) = match dice_type {
        DiceType::D6 => {
            let (mesh, faces) = build_cube_grid(options.grid, options.size);
            (mesh, Some(faces))
        }
        DiceType::D4 => (polyhedron_mesh(Polyhedron::tetrahedron(), options), None),
        DiceType::D8 => (polyhedron_mesh(Polyhedron::octahedron(), options), None),
        DiceType::D10 => (polyhedron_mesh(Polyhedron::pentagonal_trapezohedron(), options), None),
        DiceType::D12 => (polyhedron_mesh(Polyhedron::dodecahedron(), options), None),
        DiceType::D20 => (polyhedron_mesh(Polyhedron::icosahedron(), options), None),
    };

    debug!(
        %dice_type,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "built die mesh"
    );

    DieMesh {
        dice_type,
        options: *options,
        mesh,
        faces,
    }
}

/// Build a die from a label, falling back to the cube for unknown labels.
pub fn build_mesh_for_label(label: &str, options: &GeometryOptions) -> DieMesh {
    build_mesh_with_options(DiceType::parse_or_default(label), options)
}

fn polyhedron_mesh(solid: Polyhedron, options: &GeometryOptions) -> Mesh {
    solid.scaled_to(options.polyhedron_radius).to_mesh()
}
