//! Subdivided cube construction.
//!
//! Each face is a `(grid + 1) x (grid + 1)` vertex lattice so engraving has
//! enough vertices to carve detail into.

use crate::mesh::Mesh;
use glam::{Vec2, Vec3};

/// Orientation frame of one cube face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub normal: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

/// Cube faces in face-index order: front, back, top, bottom, right, left.
pub const CUBE_FACES: [FaceFrame; 6] = [
    FaceFrame { normal: Vec3::Z, up: Vec3::Y, right: Vec3::X },
    FaceFrame { normal: Vec3::NEG_Z, up: Vec3::Y, right: Vec3::NEG_X },
    FaceFrame { normal: Vec3::Y, up: Vec3::NEG_Z, right: Vec3::X },
    FaceFrame { normal: Vec3::NEG_Y, up: Vec3::Z, right: Vec3::X },
    FaceFrame { normal: Vec3::X, up: Vec3::Y, right: Vec3::NEG_Z },
    FaceFrame { normal: Vec3::NEG_X, up: Vec3::Y, right: Vec3::Z },
];

/// Vertex indices of each flat face, in generation (row-major) order.
///
/// Built once alongside the mesh it indexes and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceVertexGroup {
    faces: Vec<Vec<u32>>,
}

impl FaceVertexGroup {
    pub fn new(faces: Vec<Vec<u32>>) -> Self {
        Self { faces }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex indices of `face`, or `None` when out of range.
    pub fn get(&self, face: usize) -> Option<&[u32]> {
        self.faces.get(face).map(Vec::as_slice)
    }

    /// Index of the face that owns `vertex`, if any.
    pub fn face_of(&self, vertex: u32) -> Option<usize> {
        self.faces.iter().position(|f| f.contains(&vertex))
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u32]> {
        self.faces.iter().map(Vec::as_slice)
    }
}

/// Build a cube of edge `size` centred at the origin with `grid`
/// subdivisions per face edge.
pub fn build_cube_grid(grid: u32, size: f32) -> (Mesh, FaceVertexGroup) {
    let grid = grid.max(1);
    let half = size / 2.0;
    let row = grid + 1;
    let verts_per_face = (row * row) as usize;

    let mut positions = Vec::with_capacity(verts_per_face * 6);
    let mut normals = Vec::with_capacity(verts_per_face * 6);
    let mut uvs = Vec::with_capacity(verts_per_face * 6);
    let mut indices = Vec::with_capacity((grid * grid * 6 * 6) as usize);
    let mut groups = Vec::with_capacity(6);

    for frame in &CUBE_FACES {
        let base = positions.len() as u32;
        let mut face_vertices = Vec::with_capacity(verts_per_face);

        for iy in 0..=grid {
            for ix in 0..=grid {
                let u = ix as f32 / grid as f32;
                let v = iy as f32 / grid as f32;
                let x = -half + u * size;
                let y = -half + v * size;

                face_vertices.push(positions.len() as u32);
                positions.push(frame.normal * half + frame.right * x + frame.up * y);
                normals.push(frame.normal);
                uvs.push(Vec2::new(u, v));
            }
        }

        for iy in 0..grid {
            for ix in 0..grid {
                let i0 = base + iy * row + ix;
                let i1 = base + iy * row + ix + 1;
                let i2 = base + (iy + 1) * row + ix + 1;
                let i3 = base + (iy + 1) * row + ix;
                indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
            }
        }

        groups.push(face_vertices);
    }

    (
        Mesh::from_buffers(positions, normals, uvs, indices),
        FaceVertexGroup::new(groups),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        for grid in [1, 2, 16] {
            let (mesh, faces) = build_cube_grid(grid, 2.0);
            let row = (grid + 1) as usize;

            assert_eq!(mesh.vertex_count(), 6 * row * row);
            assert_eq!(mesh.triangle_count(), 6 * 2 * (grid * grid) as usize);
            assert_eq!(faces.face_count(), 6);
            assert!(faces.iter().all(|f| f.len() == row * row));
            assert!(mesh.is_well_formed());
        }
    }

    #[test]
    fn test_frames_are_right_handed() {
        for frame in &CUBE_FACES {
            assert_eq!(frame.right.cross(frame.up), frame.normal);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        let (mesh, _) = build_cube_grid(4, 2.0);
        for (t, facet) in mesh.facet_normals().iter().enumerate() {
            let [a, _, _] = mesh.triangle(t);
            assert!((*facet - mesh.normals[a]).length() < 1e-6, "triangle {}", t);
        }
    }

    #[test]
    fn test_vertices_lie_on_their_face() {
        let (mesh, faces) = build_cube_grid(3, 2.0);
        for (f, group) in faces.iter().enumerate() {
            let normal = CUBE_FACES[f].normal;
            for &i in group {
                let p = mesh.positions[i as usize];
                assert!((p.dot(normal) - 1.0).abs() < 1e-6);
                assert!(p.abs().max_element() <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_face_groups_are_row_major() {
        let (mesh, faces) = build_cube_grid(2, 2.0);
        let front = faces.get(0).unwrap();

        assert_eq!(front, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(mesh.uvs[4], Vec2::new(0.5, 0.5));
        assert_eq!(mesh.positions[4], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.uvs[2], Vec2::new(1.0, 0.0));
        assert_eq!(faces.face_of(9), Some(1));
        assert!(faces.get(6).is_none());
    }

    #[test]
    fn test_bounds() {
        let (mesh, _) = build_cube_grid(2, 2.0);
        let bounds = mesh.bounding_box().unwrap();
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::splat(1.0));
    }
}
