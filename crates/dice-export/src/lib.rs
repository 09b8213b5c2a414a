//! STL export for engraved die meshes.
//!
//! Supported formats:
//! - Binary STL (little-endian, zeroed header)
//! - ASCII STL (`solid dice`, six decimal places)

pub mod reader;
pub mod size;
pub mod stl;

use dice_core::{DiceType, EngravingRequest, ExportError, ExportOptions};
use dice_engrave::{engrave, DisplacementMap};
use dice_geometry::{build_mesh_with_options, DieMesh, GeometryOptions, Mesh};
use tracing::debug;

// Re-export commonly used types
pub use reader::{read_binary_stl, StlTriangle};
pub use size::{estimate_file_size, estimate_mesh_file_size, format_file_size};
pub use stl::{encode_ascii_stl, encode_binary_stl, mesh_to_stl, mesh_to_stl_ascii, StlSource};

/// A finished STL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlFile {
    pub data: Vec<u8>,
    pub binary: bool,
}

impl StlFile {
    pub fn mime_type(&self) -> &'static str {
        if self.binary {
            "application/octet-stream"
        } else {
            "text/plain"
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.stl", stem)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Serialize a mesh as-is in the variant `options` selects.
pub fn serialize(mesh: &Mesh, options: &ExportOptions) -> Result<StlFile, ExportError> {
    let data = if options.binary {
        mesh_to_stl(mesh)?
    } else {
        mesh_to_stl_ascii(mesh)?.into_bytes()
    };

    debug!(
        binary = options.binary,
        triangles = mesh.triangle_count(),
        bytes = data.len(),
        "serialized STL"
    );

    Ok(StlFile {
        data,
        binary: options.binary,
    })
}

/// Export a built die.
///
/// The mesh is flat-shaded first so every facet carries its own recomputed
/// normal. When displacement is excluded, a fresh base mesh of the same die
/// is exported instead of the engraved one.
pub fn export_die(die: &DieMesh, options: &ExportOptions) -> Result<StlFile, ExportError> {
    let base;
    let mesh = if options.include_displacement {
        &die.mesh
    } else {
        base = die.rebuild().mesh;
        &base
    };
    // Flattening drops bad triangles, so check the indexed buffers first.
    StlSource::from(mesh).validate()?;
    serialize(&mesh.to_flat_shaded(), options)
}

/// Build, engrave, and export a die in one pass.
///
/// The cube grid is scaled by `options.resolution`. Engravings are skipped
/// entirely when `options.include_displacement` is false.
pub fn export_customized(
    dice_type: DiceType,
    engravings: &[(EngravingRequest, DisplacementMap)],
    options: &ExportOptions,
) -> Result<StlFile, ExportError> {
    let mut die = build_mesh_with_options(dice_type, &GeometryOptions::for_resolution(options.resolution));

    if options.include_displacement {
        for (request, map) in engravings {
            engrave(&mut die, request, map)?;
        }
    }

    export_die(&die, options)
}
