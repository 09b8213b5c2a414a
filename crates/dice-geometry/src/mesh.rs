//! Triangle mesh and bounding volume types.

use glam::{Vec2, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn from_points(points: impl Iterator<Item = Vec3>) -> Option<Self> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut has_points = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            has_points = true;
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }
}

/// Normal of a triangle by the right-hand rule over its winding order.
///
/// Degenerate triangles yield the zero vector.
pub fn triangle_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    (v2 - v1).cross(v3 - v1).normalize_or_zero()
}

/// A triangle mesh with one normal and one UV per vertex.
///
/// `positions`, `normals` and `uvs` are parallel buffers. An empty index
/// buffer means the positions are already laid out as consecutive triangles.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    bounds: Option<BoundingBox>,
    facet_normals: Vec<Vec3>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a mesh from raw buffers and compute its derived data.
    pub fn from_buffers(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        let mut mesh = Self {
            positions,
            normals,
            uvs,
            indices,
            bounds: None,
            facet_normals: Vec::new(),
        };
        mesh.refresh();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.positions.len() / 3
        }
    }

    /// Vertex indices of triangle `t` in winding order.
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        if self.is_indexed() {
            let i = t * 3;
            [
                self.indices[i] as usize,
                self.indices[i + 1] as usize,
                self.indices[i + 2] as usize,
            ]
        } else {
            let i = t * 3;
            [i, i + 1, i + 2]
        }
    }

    /// Corner positions of triangle `t`, or `None` when an index is out of
    /// range.
    pub fn triangle_positions(&self, t: usize) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.triangle(t);
        Some([
            *self.positions.get(a)?,
            *self.positions.get(b)?,
            *self.positions.get(c)?,
        ])
    }

    /// Cached bounding box, as of the last [`Mesh::refresh`].
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Cached per-triangle normals, as of the last [`Mesh::refresh`].
    pub fn facet_normals(&self) -> &[Vec3] {
        &self.facet_normals
    }

    /// Recompute the bounding box and per-triangle normals from the
    /// current positions. Must run after any position edit.
    ///
    /// Triangles with an out-of-range index get a zero normal.
    pub fn refresh(&mut self) {
        self.bounds = BoundingBox::from_points(self.positions.iter().copied());
        self.facet_normals = (0..self.triangle_count())
            .map(|t| {
                self.triangle_positions(t)
                    .map_or(Vec3::ZERO, |[a, b, c]| triangle_normal(a, b, c))
            })
            .collect();
    }

    /// Check the structural invariants: parallel buffers of equal length,
    /// a whole number of triangles, and every index in range.
    pub fn is_well_formed(&self) -> bool {
        let n = self.positions.len();
        n == self.normals.len()
            && n == self.uvs.len()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Un-weld into independent triangles, each vertex carrying the
    /// triangle's recomputed normal. The result has no index buffer.
    ///
    /// Triangles with an out-of-range index are dropped; check
    /// [`Mesh::is_well_formed`] first when that matters.
    pub fn to_flat_shaded(&self) -> Mesh {
        let triangles = self.triangle_count();
        let mut positions = Vec::with_capacity(triangles * 3);
        let mut normals = Vec::with_capacity(triangles * 3);
        let mut uvs = Vec::with_capacity(triangles * 3);

        for t in 0..triangles {
            let Some(corner_positions) = self.triangle_positions(t) else {
                continue;
            };
            let [a, b, c] = corner_positions;
            let normal = triangle_normal(a, b, c);
            for (i, position) in self.triangle(t).into_iter().zip(corner_positions) {
                positions.push(position);
                normals.push(normal);
                uvs.push(self.uvs.get(i).copied().unwrap_or(Vec2::ZERO));
            }
        }

        Mesh::from_buffers(positions, normals, uvs, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh::from_buffers(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_triangle_normal_right_hand_rule() {
        assert_eq!(triangle_normal(Vec3::ZERO, Vec3::X, Vec3::Y), Vec3::Z);
        assert_eq!(triangle_normal(Vec3::ZERO, Vec3::Y, Vec3::X), Vec3::NEG_Z);
    }

    #[test]
    fn test_degenerate_triangle_normal_is_zero() {
        assert_eq!(triangle_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0), Vec3::ZERO);
    }

    #[test]
    fn test_refresh_tracks_positions() {
        let mut mesh = unit_triangle();
        let bounds = mesh.bounding_box().unwrap();
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));

        mesh.positions[2] = Vec3::new(0.0, 1.0, 3.0);
        mesh.refresh();
        assert_eq!(mesh.bounding_box().unwrap().max.z, 3.0);
        assert!(mesh.facet_normals()[0].z < 1.0);
    }

    #[test]
    fn test_to_flat_shaded() {
        let mesh = Mesh::from_buffers(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            vec![Vec3::Z; 4],
            vec![Vec2::ZERO; 4],
            vec![0, 1, 2, 0, 2, 3],
        );
        let flat = mesh.to_flat_shaded();

        assert!(!flat.is_indexed());
        assert_eq!(flat.vertex_count(), 6);
        assert_eq!(flat.triangle_count(), 2);
        assert!(flat.is_well_formed());
        assert!(flat.normals.iter().all(|n| *n == Vec3::Z));
        assert_eq!(flat.positions[3], Vec3::ZERO);
        assert_eq!(flat.positions[5], Vec3::Y);
    }

    #[test]
    fn test_well_formed_rejects_bad_index() {
        let mut mesh = unit_triangle();
        assert!(mesh.is_well_formed());
        mesh.indices[2] = 3;
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        let mesh = Mesh::from_buffers(vec![Vec3::ZERO; 3], Vec::new(), Vec::new(), vec![0, 1, 5]);
        assert!(!mesh.is_well_formed());
        assert_eq!(mesh.facet_normals(), &[Vec3::ZERO]);
        assert_eq!(mesh.triangle_positions(0), None);

        let mut mesh = unit_triangle();
        mesh.indices.extend_from_slice(&[0, 1, 999]);
        mesh.refresh();
        let flat = mesh.to_flat_shaded();
        assert_eq!(flat.triangle_count(), 1);
        assert!(flat.is_well_formed());
    }
}
