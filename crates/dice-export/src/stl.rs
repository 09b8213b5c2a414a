//! STL encoding for 3D printing.

use dice_core::ExportError;
use dice_geometry::{triangle_normal, Mesh};
use glam::Vec3;

/// Solid name written in ASCII output.
pub const SOLID_NAME: &str = "dice";

/// Size of the binary header, in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one binary triangle record, in bytes.
pub const TRIANGLE_RECORD_SIZE: usize = 50;

/// Borrowed view of the buffers the STL writer reads.
///
/// Without an index buffer, positions are read as consecutive triangles.
#[derive(Debug, Clone, Copy)]
pub struct StlSource<'a> {
    pub positions: &'a [Vec3],
    pub normals: Option<&'a [Vec3]>,
    pub indices: Option<&'a [u32]>,
}

impl<'a> From<&'a Mesh> for StlSource<'a> {
    fn from(mesh: &'a Mesh) -> Self {
        Self {
            positions: &mesh.positions,
            normals: (!mesh.normals.is_empty()).then_some(mesh.normals.as_slice()),
            indices: mesh.is_indexed().then_some(mesh.indices.as_slice()),
        }
    }
}

impl StlSource<'_> {
    pub fn triangle_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    fn corners(&self, t: usize) -> [usize; 3] {
        let i = t * 3;
        match self.indices {
            Some(indices) => [
                indices[i] as usize,
                indices[i + 1] as usize,
                indices[i + 2] as usize,
            ],
            None => [i, i + 1, i + 2],
        }
    }

    /// Reject anything that would stop the writer part way through.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.positions.is_empty() {
            return Err(ExportError::MissingVertexData);
        }
        if let Some(normals) = self.normals {
            if normals.len() != self.positions.len() {
                return Err(ExportError::MismatchedNormals {
                    positions: self.positions.len(),
                    normals: normals.len(),
                });
            }
        }
        if let Some(indices) = self.indices {
            let vertex_count = self.positions.len();
            if let Some(at) = indices.iter().position(|&i| i as usize >= vertex_count) {
                return Err(ExportError::IndexOutOfRange {
                    triangle: at / 3,
                    index: indices[at],
                    vertex_count,
                });
            }
        }
        let count = self.triangle_count();
        if u32::try_from(count).is_err() {
            return Err(ExportError::TooManyTriangles { count });
        }
        Ok(())
    }

    /// Normal and vertices of triangle `t`.
    ///
    /// Uses the first vertex's stored normal when normals are present,
    /// otherwise the right-hand-rule normal of the winding order.
    fn facet(&self, t: usize) -> (Vec3, [Vec3; 3]) {
        let [a, b, c] = self.corners(t);
        let vertices = [self.positions[a], self.positions[b], self.positions[c]];
        let normal = match self.normals {
            Some(normals) => normals[a],
            None => triangle_normal(vertices[0], vertices[1], vertices[2]),
        };
        (normal, vertices)
    }
}

/// Encode as binary STL: zeroed 80-byte header, little-endian triangle
/// count, then one 50-byte record per triangle.
pub fn encode_binary_stl(source: &StlSource<'_>) -> Result<Vec<u8>, ExportError> {
    source.validate()?;

    let triangle_count = source.triangle_count();
    let mut output = Vec::with_capacity(HEADER_SIZE + 4 + triangle_count * TRIANGLE_RECORD_SIZE);

    output.extend_from_slice(&[0u8; HEADER_SIZE]);
    output.extend_from_slice(&(triangle_count as u32).to_le_bytes());

    for t in 0..triangle_count {
        let (normal, vertices) = source.facet(t);
        for v in std::iter::once(normal).chain(vertices) {
            output.extend_from_slice(&v.x.to_le_bytes());
            output.extend_from_slice(&v.y.to_le_bytes());
            output.extend_from_slice(&v.z.to_le_bytes());
        }
        // Attribute byte count
        output.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(output)
}

/// Encode as ASCII STL with six decimal places per coordinate.
pub fn encode_ascii_stl(source: &StlSource<'_>) -> Result<String, ExportError> {
    source.validate()?;

    let triangle_count = source.triangle_count();
    // Roughly 250 bytes per facet.
    let mut output = String::with_capacity(32 + triangle_count * 256);

    output.push_str(&format!("solid {}\n", SOLID_NAME));
    for t in 0..triangle_count {
        let (normal, vertices) = source.facet(t);
        output.push_str("  facet normal ");
        push_coords(&mut output, normal);
        output.push_str("    outer loop\n");
        for v in vertices {
            output.push_str("      vertex ");
            push_coords(&mut output, v);
        }
        output.push_str("    endloop\n");
        output.push_str("  endfacet\n");
    }
    output.push_str(&format!("endsolid {}\n", SOLID_NAME));

    Ok(output)
}

fn push_coords(output: &mut String, v: Vec3) {
    output.push_str(&format!("{} {} {}\n", fixed6(v.x), fixed6(v.y), fixed6(v.z)));
}

/// Six decimals, printing negative zero as `0.000000`.
fn fixed6(value: f32) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.6}", value)
}

/// Encode a mesh directly to binary STL.
pub fn mesh_to_stl(mesh: &Mesh) -> Result<Vec<u8>, ExportError> {
    encode_binary_stl(&StlSource::from(mesh))
}

/// Encode a mesh directly to ASCII STL.
pub fn mesh_to_stl_ascii(mesh: &Mesh) -> Result<String, ExportError> {
    encode_ascii_stl(&StlSource::from(mesh))
}
