//! Face engraving by displacement along vertex normals.
//!
//! Repeated calls are additive: each one offsets the current positions and
//! nothing records the pre-engraving state. Use [`DieMesh::rebuild`] to start
//! over from the base mesh.
//!
//! [`DieMesh::rebuild`]: dice_geometry::DieMesh::rebuild

use crate::map::DisplacementMap;
use dice_core::{EngraveError, EngravingRequest};
use dice_geometry::{DieMesh, FaceVertexGroup, Mesh};
use tracing::debug;

/// Summary of one engraving pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngravingStats {
    pub modified_vertices: usize,
    pub average_displacement: f32,
}

/// Displace every vertex of `face_index` along its stored normal by
/// `intensity * strength`, then refresh the mesh's bounds and facet normals.
///
/// Fails without touching the mesh if the face, the strength, or any vertex
/// index of the face is invalid.
pub fn apply_engraving(
    mesh: &mut Mesh,
    faces: &FaceVertexGroup,
    face_index: usize,
    map: &DisplacementMap,
    strength: f32,
) -> Result<EngravingStats, EngraveError> {
    let vertices = faces.get(face_index).ok_or(EngraveError::InvalidFaceIndex {
        face: face_index,
        available: faces.face_count(),
    })?;

    if !strength.is_finite() || strength < 0.0 {
        return Err(EngraveError::InvalidStrength { strength });
    }

    let vertex_count = mesh.vertex_count().min(mesh.normals.len()).min(mesh.uvs.len());
    if let Some(&index) = vertices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(EngraveError::VertexOutOfRange { index, vertex_count });
    }

    let mut total = 0.0;
    for &idx in vertices {
        let idx = idx as usize;
        let uv = mesh.uvs[idx];
        let offset = map.sample(uv.x, uv.y) * strength;
        mesh.positions[idx] += mesh.normals[idx] * offset;
        total += offset;
    }

    mesh.refresh();

    let stats = EngravingStats {
        modified_vertices: vertices.len(),
        average_displacement: if vertices.is_empty() {
            0.0
        } else {
            total / vertices.len() as f32
        },
    };
    debug!(
        face = face_index,
        strength,
        modified = stats.modified_vertices,
        average = stats.average_displacement,
        "applied engraving"
    );
    Ok(stats)
}

/// Engrave one face of a built die.
///
/// Dice without per-face vertex groups reject every face index.
pub fn engrave(
    die: &mut DieMesh,
    request: &EngravingRequest,
    map: &DisplacementMap,
) -> Result<EngravingStats, EngraveError> {
    let faces = die.faces.as_ref().ok_or(EngraveError::NoFaceGroups {
        face: request.face_index,
        dice_type: die.dice_type,
    })?;
    apply_engraving(&mut die.mesh, faces, request.face_index, map, request.strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::DiceType;
    use dice_geometry::{build_mesh, build_mesh_with_options, GeometryOptions, CUBE_FACES};
    use glam::{Vec2, Vec3};

    fn small_cube() -> DieMesh {
        build_mesh_with_options(DiceType::D6, &GeometryOptions::default().with_grid(2))
    }

    /// 3x3 white map with a single black texel in the centre.
    fn center_dot() -> DisplacementMap {
        DisplacementMap::from_fn(3, 3, |x, y| if (x, y) == (1, 1) { 0 } else { 255 }).unwrap()
    }

    #[test]
    fn test_zero_strength_is_noop() {
        let mut die = small_cube();
        let before = die.mesh.positions.clone();
        let black = DisplacementMap::solid(8, 8, 0).unwrap();

        engrave(&mut die, &EngravingRequest::new(0, 0.0), &black).unwrap();
        assert_eq!(die.mesh.positions, before);
    }

    #[test]
    fn test_white_map_is_noop() {
        let mut die = small_cube();
        let before = die.mesh.positions.clone();
        let white = DisplacementMap::solid(8, 8, 255).unwrap();

        let stats = engrave(&mut die, &EngravingRequest::new(3, 0.7), &white).unwrap();
        assert_eq!(die.mesh.positions, before);
        assert_eq!(stats.average_displacement, 0.0);
    }

    #[test]
    fn test_black_map_offsets_whole_face_by_strength() {
        let mut die = small_cube();
        let before = die.mesh.positions.clone();
        let black = DisplacementMap::solid(8, 8, 0).unwrap();

        let stats = engrave(&mut die, &EngravingRequest::new(4, 0.25), &black).unwrap();
        assert_eq!(stats.modified_vertices, 9);
        assert!((stats.average_displacement - 0.25).abs() < 1e-6);

        let faces = die.faces.as_ref().unwrap();
        for &i in faces.get(4).unwrap() {
            let moved = die.mesh.positions[i as usize] - before[i as usize];
            assert!((moved - CUBE_FACES[4].normal * 0.25).length() < 1e-6);
        }
    }

    #[test]
    fn test_center_dot_moves_only_center_vertex() {
        let mut die = small_cube();
        let before = die.mesh.positions.clone();

        engrave(&mut die, &EngravingRequest::new(0, 0.5), &center_dot()).unwrap();

        let faces = die.faces.as_ref().unwrap();
        let center = faces
            .get(0)
            .unwrap()
            .iter()
            .map(|&i| i as usize)
            .min_by(|&a, &b| {
                let da = die.mesh.uvs[a].distance(Vec2::splat(0.5));
                let db = die.mesh.uvs[b].distance(Vec2::splat(0.5));
                da.total_cmp(&db)
            })
            .unwrap();

        assert_eq!(die.mesh.positions[center] - before[center], Vec3::new(0.0, 0.0, 0.5));
        for (i, (after, orig)) in die.mesh.positions.iter().zip(&before).enumerate() {
            if i != center {
                assert_eq!(after, orig, "vertex {} moved", i);
            }
        }
    }

    #[test]
    fn test_repeated_engraving_is_additive() {
        let mut die = small_cube();
        let black = DisplacementMap::solid(2, 2, 0).unwrap();
        let request = EngravingRequest::new(0, 0.1);

        engrave(&mut die, &request, &black).unwrap();
        engrave(&mut die, &request, &black).unwrap();
        assert!((die.mesh.positions[0].z - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_refreshes_bounds_and_facets() {
        let mut die = small_cube();
        engrave(&mut die, &EngravingRequest::new(0, 0.5), &center_dot()).unwrap();

        assert!((die.mesh.bounding_box().unwrap().max.z - 1.5).abs() < 1e-6);
        let tilted = die
            .mesh
            .facet_normals()
            .iter()
            .filter(|n| (**n - Vec3::Z).length() > 1e-3 && n.z > 0.0)
            .count();
        assert!(tilted > 0);
    }

    #[test]
    fn test_invalid_face_index() {
        let mut die = small_cube();
        let map = DisplacementMap::solid(2, 2, 0).unwrap();
        let err = engrave(&mut die, &EngravingRequest::new(6, 0.3), &map).unwrap_err();

        assert_eq!(err, EngraveError::InvalidFaceIndex { face: 6, available: 6 });
        assert!(err.is_invalid_face());
    }

    #[test]
    fn test_non_cube_rejects_engraving() {
        let mut die = build_mesh(DiceType::D20);
        let before = die.mesh.positions.clone();
        let map = DisplacementMap::solid(2, 2, 0).unwrap();

        let err = engrave(&mut die, &EngravingRequest::new(0, 0.3), &map).unwrap_err();
        assert!(err.is_invalid_face());
        assert_eq!(die.mesh.positions, before);
    }

    #[test]
    fn test_negative_strength_rejected() {
        let mut die = small_cube();
        let map = DisplacementMap::solid(2, 2, 0).unwrap();
        let err = engrave(&mut die, &EngravingRequest::new(0, -1.0), &map).unwrap_err();
        assert!(matches!(err, EngraveError::InvalidStrength { .. }));
    }
}
