//! Regular polyhedra for the non-cube dice.
//!
//! These are coarse, flat-shaded solids. They are not subdivided and do not
//! expose per-face vertex groups, so they cannot be engraved.

use crate::mesh::Mesh;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const EDGE_EPSILON: f32 = 1e-3;

/// A convex polyhedron as vertices plus polygon faces.
///
/// Every face lists its vertices counter-clockwise seen from outside.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    /// Four equilateral triangles (D4).
    pub fn tetrahedron() -> Self {
        let vertices = vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        let faces = triangles_with_edge(&vertices, 2.0 * 2f32.sqrt());
        Self::oriented(vertices, faces)
    }

    /// Eight equilateral triangles (D8).
    pub fn octahedron() -> Self {
        let vertices = vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        let faces = triangles_with_edge(&vertices, 2f32.sqrt());
        Self::oriented(vertices, faces)
    }

    /// Twenty equilateral triangles (D20).
    pub fn icosahedron() -> Self {
        let phi = (1.0 + 5f32.sqrt()) / 2.0;
        let mut vertices = Vec::with_capacity(12);
        for a in [-1.0, 1.0] {
            for b in [-phi, phi] {
                vertices.push(Vec3::new(0.0, a, b));
                vertices.push(Vec3::new(a, b, 0.0));
                vertices.push(Vec3::new(b, 0.0, a));
            }
        }
        let faces = triangles_with_edge(&vertices, 2.0);
        Self::oriented(vertices, faces)
    }

    /// Twelve regular pentagons (D12), built as the dual of the icosahedron.
    pub fn dodecahedron() -> Self {
        let ico = Self::icosahedron();
        let centroids: Vec<Vec3> = ico
            .faces
            .iter()
            .map(|f| f.iter().map(|&i| ico.vertices[i]).sum::<Vec3>() / f.len() as f32)
            .collect();

        let faces = (0..ico.vertices.len())
            .map(|v| {
                let around: Vec<usize> = ico
                    .faces
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| f.contains(&v))
                    .map(|(i, _)| i)
                    .collect();
                sort_around_axis(&centroids, around, ico.vertices[v])
            })
            .collect();

        Self::oriented(centroids, faces)
    }

    /// Ten planar kites around two apexes (D10).
    pub fn pentagonal_trapezohedron() -> Self {
        let cos36 = (PI / 5.0).cos();
        // Ring height that keeps each kite planar for apex height 1 and ring radius 1.
        let ring = (1.0 - cos36) / (1.0 + cos36);

        let mut vertices = vec![Vec3::Y, Vec3::NEG_Y];
        for k in 0..5 {
            let upper = k as f32 * TAU / 5.0;
            let lower = upper + PI / 5.0;
            vertices.push(Vec3::new(upper.cos(), ring, upper.sin()));
            vertices.push(Vec3::new(lower.cos(), -ring, lower.sin()));
        }

        let upper = |k: usize| 2 + 2 * (k % 5);
        let lower = |k: usize| 3 + 2 * (k % 5);
        let mut faces = Vec::with_capacity(10);
        for k in 0..5 {
            faces.push(vec![0, upper(k), lower(k), upper(k + 1)]);
            faces.push(vec![1, lower(k), upper(k + 1), lower(k + 1)]);
        }
        Self::oriented(vertices, faces)
    }

    fn oriented(vertices: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Self {
        let faces = faces
            .into_iter()
            .map(|mut face| {
                let points: Vec<Vec3> = face.iter().map(|&i| vertices[i]).collect();
                let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
                if polygon_normal(&points).dot(centroid) < 0.0 {
                    face.reverse();
                }
                face
            })
            .collect();
        Self { vertices, faces }
    }

    /// Uniformly scale so the farthest vertex sits at `radius`.
    pub fn scaled_to(mut self, radius: f32) -> Self {
        let extent = self.vertices.iter().map(|v| v.length()).fold(0.0, f32::max);
        if extent > 0.0 {
            let factor = radius / extent;
            for v in &mut self.vertices {
                *v *= factor;
            }
        }
        self
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Flat-shaded triangle mesh: each face owns its vertices and is
    /// fan-triangulated from its first vertex.
    pub fn to_mesh(&self) -> Mesh {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices = Vec::new();

        for face in &self.faces {
            let points: Vec<Vec3> = face.iter().map(|&i| self.vertices[i]).collect();
            let normal = polygon_normal(&points);
            let base = positions.len() as u32;
            let n = points.len();

            for (k, p) in points.into_iter().enumerate() {
                let angle = TAU * k as f32 / n as f32 + PI / 2.0;
                positions.push(p);
                normals.push(normal);
                uvs.push(Vec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin()));
            }

            for k in 1..n as u32 - 1 {
                indices.extend_from_slice(&[base, base + k, base + k + 1]);
            }
        }

        Mesh::from_buffers(positions, normals, uvs, indices)
    }
}

/// Unit normal of a planar polygon, from the sum of its edge cross products.
fn polygon_normal(points: &[Vec3]) -> Vec3 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum::<Vec3>()
        .normalize_or_zero()
}

/// Every vertex triple whose three edges all have length `edge`.
fn triangles_with_edge(vertices: &[Vec3], edge: f32) -> Vec<Vec<usize>> {
    let is_edge = |a: usize, b: usize| (vertices[a].distance(vertices[b]) - edge).abs() < EDGE_EPSILON;
    let n = vertices.len();
    let mut faces = Vec::new();

    for i in 0..n {
        for j in i + 1..n {
            if !is_edge(i, j) {
                continue;
            }
            for k in j + 1..n {
                if is_edge(i, k) && is_edge(j, k) {
                    faces.push(vec![i, j, k]);
                }
            }
        }
    }
    faces
}

/// Order `indices` by angle around `axis`.
fn sort_around_axis(points: &[Vec3], mut indices: Vec<usize>, axis: Vec3) -> Vec<usize> {
    let axis = axis.normalize_or_zero();
    let center = indices.iter().map(|&i| points[i]).sum::<Vec3>() / indices.len() as f32;
    let a = (points[indices[0]] - center).normalize_or_zero();
    let b = axis.cross(a);

    let angle = |i: usize| {
        let d = points[i] - center;
        d.dot(b).atan2(d.dot(a))
    };
    indices.sort_by(|&x, &y| angle(x).total_cmp(&angle(y)));
    indices
}
