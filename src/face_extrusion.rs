//! Direct surface extraction from the occupancy volume by boundary face extrusion
//!
//! Emits one quad (two triangles) for every face of a material voxel whose
//! 6-neighbor is empty or outside of the grid, with the outward normal pointing
//! from material into empty space. Used when no distance field is available; the
//! result is the exact blocky voxel surface.

use crate::mesh::{TriangleMesh3d, VertexWelder};
use crate::topology::FaceDirection;
use crate::uniform_grid::{UniformGrid, VoxelIndex};
use crate::volume_store::VolumeStore;
use crate::workspace::ExtractionWorkspace;
use log::debug;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Extracts the boundary faces of all material voxels as a triangle mesh.
///
/// Runs read-only against the store; per-vertex normals are the normalized sums of
/// the incident face normals.
pub fn extract_from_volume(store: &VolumeStore) -> TriangleMesh3d {
    profile!("face_extrusion::extract_from_volume");

    let grid = store.grid();
    let dims = grid.dims();
    let workspace = ExtractionWorkspace::default();

    (0..dims[2]).into_par_iter().for_each(|z| {
        let mut local = workspace.get_local().borrow_mut();
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                let idx = [x, y, z];
                if !store.is_material(idx) {
                    continue;
                }
                for direction in FaceDirection::ALL {
                    let offset = direction.index_offset();
                    // Out-of-grid neighbors read as empty, closing the outer shell
                    if !store.is_material([x + offset[0], y + offset[1], z + offset[2]]) {
                        emit_face(grid, idx, direction, &mut local);
                    }
                }
            }
        }
    });

    let mesh = workspace.into_merged_mesh();
    debug!(
        "Face extrusion extracted {} triangles over {} vertices",
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    mesh
}

/// Emits the quad of one voxel face, wound counter-clockwise seen from outside
fn emit_face(
    grid: &UniformGrid,
    idx: VoxelIndex,
    direction: FaceDirection,
    output: &mut VertexWelder,
) {
    let aabb = grid.voxel_aabb_world(idx);
    let (lo, hi) = (*aabb.min(), *aabb.max());

    let corners: [Vector3<f32>; 4] = match direction {
        FaceDirection::XPos => [
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
        ],
        FaceDirection::XNeg => [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, lo.z),
        ],
        FaceDirection::YPos => [
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, lo.z),
        ],
        FaceDirection::YNeg => [
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(lo.x, lo.y, lo.z),
        ],
        FaceDirection::ZPos => [
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
        ],
        FaceDirection::ZNeg => [
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, lo.y, lo.z),
        ],
    };

    let normal = direction.normal();
    output.add_triangle(&[corners[0], corners[1], corners[2]], &[normal, normal, normal]);
    output.add_triangle(&[corners[0], corners[2], corners[3]], &[normal, normal, normal]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::Aabb3;

    #[test]
    fn test_single_voxel_cube() {
        let store = VolumeStore::new(
            &Aabb3::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)),
            1.0,
        )
        .unwrap();
        let mesh = extract_from_volume(&store);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!((mesh.enclosed_volume() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_block_winding_outward() {
        let store = VolumeStore::new(
            &Aabb3::new(Vector3::zeros(), Vector3::new(2.0, 2.0, 2.0)),
            1.0,
        )
        .unwrap();
        let mesh = extract_from_volume(&store);

        assert_eq!(mesh.triangle_count(), 48);
        assert!((mesh.enclosed_volume() - 8.0).abs() < 1e-4);

        let center = Vector3::new(1.0, 1.0, 1.0);
        for t in &mesh.triangles {
            let n = mesh.face_normal(t);
            let centroid = (mesh.vertices[t[0] as usize]
                + mesh.vertices[t[1] as usize]
                + mesh.vertices[t[2] as usize])
                / 3.0;
            assert!(n.dot(&(centroid - center)) > 0.0);
        }
    }

    #[test]
    fn test_cavity_faces_point_inward() {
        let store = VolumeStore::new(
            &Aabb3::new(Vector3::zeros(), Vector3::new(5.0, 5.0, 5.0)),
            1.0,
        )
        .unwrap();
        // Carve out the center voxel; its six cavity faces must face the cavity
        store.set([2, 2, 2], false);
        let mesh = extract_from_volume(&store);

        // 6 outer faces of 25 quads each, plus 6 cavity quads
        assert_eq!(mesh.triangle_count(), (6 * 25 + 6) * 2);
        assert!((mesh.enclosed_volume() - 124.0).abs() < 1e-3);

        let cavity_center = Vector3::new(2.5, 2.5, 2.5);
        for t in &mesh.triangles {
            let centroid = (mesh.vertices[t[0] as usize]
                + mesh.vertices[t[1] as usize]
                + mesh.vertices[t[2] as usize])
                / 3.0;
            if (centroid - cavity_center).norm() < 0.8 {
                // Cavity face: outward (from material) means towards the cavity center
                let n = mesh.face_normal(t);
                assert!(n.dot(&(cavity_center - centroid)) > 0.0);
            }
        }
    }

    #[test]
    fn test_empty_store_empty_mesh() {
        let store = VolumeStore::new(
            &Aabb3::new(Vector3::zeros(), Vector3::new(3.0, 3.0, 3.0)),
            1.0,
        )
        .unwrap();
        store.remove_sphere(&Vector3::new(1.5, 1.5, 1.5), 10.0);
        assert_eq!(store.count_material(), 0);
        let mesh = extract_from_volume(&store);
        assert!(mesh.is_empty());
    }
}
