//! Binary STL decoding, used to check written files.

use crate::stl::{HEADER_SIZE, TRIANGLE_RECORD_SIZE};
use dice_core::ExportError;
use glam::Vec3;

/// One decoded STL facet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
    pub attribute: u16,
}

/// Decode a binary STL byte stream.
pub fn read_binary_stl(data: &[u8]) -> Result<Vec<StlTriangle>, ExportError> {
    if data.len() < HEADER_SIZE + 4 {
        return Err(ExportError::Malformed {
            reason: "too small for header and triangle count".to_string(),
        });
    }

    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected = HEADER_SIZE + 4 + count * TRIANGLE_RECORD_SIZE;
    if data.len() < expected {
        return Err(ExportError::Malformed {
            reason: format!(
                "truncated: expected {} bytes for {} triangles, got {}",
                expected,
                count,
                data.len()
            ),
        });
    }

    let triangles = data[HEADER_SIZE + 4..expected]
        .chunks_exact(TRIANGLE_RECORD_SIZE)
        .map(|record| StlTriangle {
            normal: read_vec3(record, 0),
            vertices: [read_vec3(record, 12), read_vec3(record, 24), read_vec3(record, 36)],
            attribute: u16::from_le_bytes([record[48], record[49]]),
        })
        .collect();

    Ok(triangles)
}

fn read_vec3(record: &[u8], offset: usize) -> Vec3 {
    let f = |i: usize| {
        let at = offset + i * 4;
        f32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
    };
    Vec3::new(f(0), f(1), f(2))
}
