//! File size estimation for display.

use crate::stl::{StlSource, HEADER_SIZE, TRIANGLE_RECORD_SIZE};
use dice_geometry::Mesh;

/// Exact binary STL size for `triangle_count` triangles.
pub fn estimate_file_size(triangle_count: usize) -> u64 {
    (TRIANGLE_RECORD_SIZE * triangle_count + HEADER_SIZE + 4) as u64
}

/// Binary STL size of a mesh, or `None` when it has no positions.
pub fn estimate_mesh_file_size(mesh: &Mesh) -> Option<u64> {
    if mesh.positions.is_empty() {
        return None;
    }
    Some(estimate_file_size(StlSource::from(mesh).triangle_count()))
}

/// Human readable size in base-1024 units, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    while exponent + 1 < UNITS.len() && bytes >= 1u64 << (10 * (exponent + 1)) {
        exponent += 1;
    }
    let value = bytes as f64 / (1u64 << (10 * exponent)) as f64;

    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[exponent])
}
