//! Mills a few slots into a stock block and writes the result as binary STL.
//!
//! Run with: `cargo run --example mill_block -- out.stl`

use nalgebra::Vector3;
use std::sync::Arc;
use voxcut::{Aabb3, CutterBackend, SdfGrid, SdfParameters, Tool, VolumeStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "mill_block.stl".to_string());

    let domain = Aabb3::new(
        Vector3::new(-25.0, -15.0, -10.0),
        Vector3::new(25.0, 15.0, 10.0),
    );
    let store = Arc::new(VolumeStore::new(&domain, 0.25)?);

    let mut sdf = SdfGrid::from_volume_store(&store, &SdfParameters::default());
    sdf.bind_to_volume_store(&store);

    let backend = CutterBackend::Voxel(Arc::clone(&store));
    let ball = Tool::Ball {
        diameter: 6.0,
        length: 30.0,
    };
    let flat = Tool::Flat {
        diameter: 4.0,
        length: 30.0,
    };

    // Three slots across the top face, one diagonal ball pass
    for y in [-8.0f32, 0.0, 8.0] {
        backend.cut_segment(&flat, &Vector3::new(-20.0, y, 8.0), &Vector3::new(20.0, y, 8.0));
    }
    backend.cut_segment(&ball, &Vector3::new(-20.0, -10.0, 9.0), &Vector3::new(20.0, 10.0, 9.0));
    // A plunge in the center
    backend.cut_point(&ball, &Vector3::new(0.0, 0.0, 5.0));

    let mesh = voxcut::extract_from_sdf(&sdf);
    println!(
        "Extracted {} triangles over {} vertices, enclosed volume {:.1}",
        mesh.triangle_count(),
        mesh.vertex_count(),
        mesh.enclosed_volume()
    );

    voxcut::save_binary_stl(&mesh, &output_path)?;
    println!("Wrote {}", output_path);
    Ok(())
}
