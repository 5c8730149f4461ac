//! End-to-end milling scenarios across volume store, SDF and extraction

use nalgebra::Vector3;
use std::sync::Arc;
use voxcut::{
    extract_from_sdf, extract_from_volume, extract_via_sdf, Aabb3, CutterBackend, OccupancyKind,
    SdfGrid, SdfParameters, Tool, VolumeStore,
};

fn domain(half: f32) -> Aabb3 {
    Aabb3::new(Vector3::repeat(-half), Vector3::repeat(half))
}

#[test]
fn scenario_single_sphere_removal() {
    let store = VolumeStore::new(&domain(10.0), 1.0).unwrap();
    assert_eq!(store.count_material(), 8000);

    store.remove_sphere(&Vector3::zeros(), 3.0);

    // Exactly the voxels whose center lies in the closed sphere are gone
    let mut removed = 0u64;
    for k in 0..20 {
        for j in 0..20 {
            for i in 0..20 {
                let center = store.grid().voxel_center_world([i, j, k]);
                if center.norm() <= 3.0 {
                    removed += 1;
                    assert!(!store.is_material([i, j, k]));
                } else if center.norm() > 3.0 + 3.0f32.sqrt() {
                    // Far voxels are untouched
                    assert!(store.is_material([i, j, k]));
                }
            }
        }
    }
    assert_eq!(store.count_material(), 8000 - removed);
    // The count drop is in the ballpark of the sphere volume in voxels
    assert!((100..180).contains(&removed));

    assert!(!store.is_material_at_world(&Vector3::zeros()));
    assert!(store.is_material_at_world(&Vector3::new(9.5, 9.5, 9.5)));
}

#[test]
fn scenario_linear_cuts_flat_and_ball() {
    for kind in [OccupancyKind::Dense, OccupancyKind::SparseOctree] {
        let store = VolumeStore::with_storage(&domain(5.0), 1.0, kind).unwrap();
        store.remove_cylinder(
            &Vector3::new(-2.0, 0.0, 0.0),
            &Vector3::new(2.0, 0.0, 0.0),
            1.0,
            true,
        );
        assert!(!store.is_material_at_world(&Vector3::zeros()));
        assert!(store.is_material_at_world(&Vector3::new(3.5, 0.0, 0.0)));
        assert!(store.is_material_at_world(&Vector3::new(0.0, 2.0, 0.0)));

        let ball = VolumeStore::with_storage(&domain(5.0), 1.0, kind).unwrap();
        ball.remove_cylinder(
            &Vector3::new(-2.0, 0.0, 0.0),
            &Vector3::new(2.0, 0.0, 0.0),
            1.0,
            false,
        );
        assert!(!ball.is_material_at_world(&Vector3::new(2.5, 0.0, 0.0)));
        assert!(ball.is_material_at_world(&Vector3::new(3.5, 0.0, 0.0)));
    }
}

#[test]
fn scenario_sdf_gradient_direction() {
    let store = VolumeStore::new(&domain(5.0), 0.5).unwrap();
    store.remove_sphere(&Vector3::zeros(), 3.0);
    let sdf = SdfGrid::from_volume_store(&store, &SdfParameters::default());

    let gradient = sdf
        .gradient_at_world(&Vector3::new(3.0, 0.0, 0.0))
        .normalize();
    assert!(gradient.x > 0.5);
    assert!(gradient.y.abs() < 0.5);
    assert!(gradient.z.abs() < 0.5);
}

#[test]
fn scenario_shell_closure_on_uncut_stock() {
    let store = VolumeStore::new(&domain(5.0), 1.0).unwrap();
    let mesh = extract_via_sdf(&store, 10);

    assert!(!mesh.is_empty());
    assert!(mesh.triangle_count() > 100);

    for d in 0..3 {
        for plane in [-5.0f32, 5.0] {
            assert!(
                mesh.vertices.iter().any(|v| (v[d] - plane).abs() <= 1.25),
                "no vertex within 1.25 of plane {} on axis {}",
                plane,
                d
            );
        }
    }

    // All face normals point away from the stock center
    for t in &mesh.triangles {
        let n = mesh.face_normal(t);
        let centroid = (mesh.vertices[t[0] as usize]
            + mesh.vertices[t[1] as usize]
            + mesh.vertices[t[2] as usize])
            / 3.0;
        assert!(n.dot(&centroid) > 0.0);
    }
}

#[test]
fn scenario_incremental_sdf_update() {
    let store = Arc::new(VolumeStore::new(&domain(10.0), 1.0).unwrap());
    store.remove_sphere(&Vector3::new(5.0, 0.0, 0.0), 2.0);
    let mut sdf = SdfGrid::from_volume_store(&store, &SdfParameters::default());
    sdf.bind_to_volume_store(&store);

    store.remove_voxel_at_world(&Vector3::new(10.0, 0.0, 0.0));

    let sampled = sdf.distance_at_world(&Vector3::new(10.0, 0.0, 0.0));
    assert!(sampled < 0.0);
    for k in 0..20 {
        for j in 0..20 {
            for i in 0..20 {
                assert!(sdf.distance_at_index([i, j, k]).is_finite());
            }
        }
    }
}

#[test]
fn mesh_invariants_after_milling() {
    let store = Arc::new(VolumeStore::new(&domain(5.0), 0.25).unwrap());
    let backend = CutterBackend::Voxel(Arc::clone(&store));
    let tool = Tool::Ball {
        diameter: 2.0,
        length: 12.0,
    };
    backend.cut_segment(&tool, &Vector3::new(-3.0, -2.0, 2.0), &Vector3::new(3.0, -2.0, 2.0));
    backend.cut_segment(&tool, &Vector3::new(3.0, 2.0, 2.0), &Vector3::new(-3.0, 2.0, 2.0));

    let mesh = extract_via_sdf(&store, 10);
    assert!(!mesh.is_empty());

    // Index validity and unit normals
    for t in &mesh.triangles {
        for &i in t {
            assert!((i as usize) < mesh.vertex_count());
        }
    }
    for n in &mesh.normals {
        assert!((n.norm() - 1.0).abs() < 1e-3);
    }

    // Winding agrees with the gradient-derived vertex normals everywhere
    for t in &mesh.triangles {
        let face = mesh.face_normal(t);
        let avg = mesh.normals[t[0] as usize]
            + mesh.normals[t[1] as usize]
            + mesh.normals[t[2] as usize];
        assert!(face.dot(&avg) > 0.0);
    }
}

#[test]
fn volume_agreement_between_extraction_modes() {
    // Fine resolution keeps the marching cubes boundary inset small relative to
    // the stock volume
    let store = VolumeStore::new(&domain(5.0), 0.2).unwrap();
    store.remove_sphere(&Vector3::zeros(), 2.0);

    let stock_volume = 10.0f32.powi(3);
    let blocky = extract_from_volume(&store);
    let smooth = extract_via_sdf(&store, 10);

    let blocky_volume = blocky.enclosed_volume();
    let smooth_volume = smooth.enclosed_volume();

    // The blocky mesh volume equals the voxel count exactly
    let voxel_volume = store.count_material() as f32 * 0.2f32.powi(3);
    assert!((blocky_volume - voxel_volume).abs() < 0.01 * stock_volume);

    let difference = (blocky_volume - smooth_volume).abs();
    assert!(
        difference < 0.05 * stock_volume,
        "extraction modes disagree: {} vs {} ({}% of stock)",
        blocky_volume,
        smooth_volume,
        100.0 * difference / stock_volume
    );
}

#[test]
fn binding_reflects_removals_in_sdf_mesh() {
    let store = Arc::new(VolumeStore::new(&domain(10.0), 1.0).unwrap());
    let mut sdf = SdfGrid::from_volume_store(&store, &SdfParameters::default());
    sdf.bind_to_volume_store(&store);

    let before = extract_from_sdf(&sdf).enclosed_volume();
    store.remove_sphere(&Vector3::zeros(), 4.0);
    let after = extract_from_sdf(&sdf).enclosed_volume();

    assert!(sdf.distance_at_world(&Vector3::zeros()) < 0.0);
    // Removing the sphere reduces the enclosed volume by roughly its volume
    let sphere_volume = 4.0 / 3.0 * std::f32::consts::PI * 4.0f32.powi(3);
    assert!(before - after > 0.5 * sphere_volume);
    assert!(before - after < 1.5 * sphere_volume);
}

#[test]
fn stl_export_of_extracted_mesh() {
    let store = VolumeStore::new(&domain(5.0), 1.0).unwrap();
    store.remove_sphere(&Vector3::zeros(), 2.0);
    let mesh = extract_via_sdf(&store, 10);

    let mut buffer = Vec::new();
    voxcut::write_binary_stl(&mesh, &mut buffer).unwrap();
    assert_eq!(buffer.len(), 80 + 4 + 50 * mesh.triangle_count());
    let count = u32::from_le_bytes(buffer[80..84].try_into().unwrap());
    assert_eq!(count as usize, mesh.triangle_count());
}
