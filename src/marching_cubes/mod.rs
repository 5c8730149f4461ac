//! Isosurface extraction from the signed distance field by parallel marching cubes
//!
//! Cells are visited from one layer before the grid to one layer after it along
//! every axis; the out-of-range sampling rule of the distance field supplies the
//! negative exterior values that close the shell along the domain boundary.
//! Triangle winding is validated against the field gradient per triangle, so the
//! outward orientation does not depend on the raw case table order.

pub mod marching_cubes_lut;

use crate::mesh::{TriangleMesh3d, VertexWelder};
use crate::sdf::{SdfGrid, SdfValues};
use crate::utils::{is_finite, lerp};
use crate::workspace::ExtractionWorkspace;
use log::debug;
use marching_cubes_lut::{marching_cubes_triangulation_iter, CORNER_OFFSETS, EDGE_CORNERS};
use nalgebra::Vector3;
use rayon::prelude::*;
use smallvec::SmallVec;

/// Triangles with a smaller geometric normal are dropped as degenerate
const DEGENERATE_FACE_NORMAL: f32 = 1e-6;

/// Corner value difference below which the edge crossing falls back to the first corner
const EDGE_INTERPOLATION_EPSILON: f32 = 1e-8;

/// Extracts the zero isosurface of the distance field as a triangle mesh.
///
/// Runs read-only against the field; multiple extractions may run concurrently,
/// but extraction must be serialized against field mutation by the caller.
pub fn extract_from_sdf(sdf: &SdfGrid) -> TriangleMesh3d {
    profile!("marching_cubes::extract_from_sdf");

    let dims = sdf.grid().dims();
    let guard = sdf.read_state();
    let values: &SdfValues = &guard;
    let workspace = ExtractionWorkspace::default();

    // One layer of cells beyond every grid face closes the outer shell
    (0..dims[2] + 1).into_par_iter().for_each(|slice| {
        let z = slice - 1;
        let mut local = workspace.get_local().borrow_mut();
        for y in -1..dims[1] {
            for x in -1..dims[0] {
                process_cell(sdf, values, [x, y, z], &mut local);
            }
        }
    });
    drop(guard);

    let mesh = workspace.into_merged_mesh();
    debug!(
        "Marching cubes extracted {} triangles over {} vertices",
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    mesh
}

/// Emits the triangles of a single cell into the thread-local output
fn process_cell(sdf: &SdfGrid, values: &SdfValues, cell: [i64; 3], output: &mut VertexWelder) {
    let mut corner_values = [0.0f32; 8];
    let mut corners_empty = [false; 8];
    for (n, offset) in CORNER_OFFSETS.iter().enumerate() {
        let sample = sdf.sample_index(
            values,
            [cell[0] + offset[0], cell[1] + offset[1], cell[2] + offset[2]],
        );
        corner_values[n] = sample;
        corners_empty[n] = sample < 0.0;
    }
    if corners_empty == [false; 8] || corners_empty == [true; 8] {
        return;
    }

    // At most 5 triangles per cell, kept on the stack
    let triangles: SmallVec<[[i32; 3]; 5]> =
        marching_cubes_triangulation_iter(&corners_empty).collect();
    for triangle in triangles {
        let mut positions = [Vector3::zeros(); 3];
        for (m, &edge) in triangle.iter().enumerate() {
            positions[m] = edge_zero_crossing(sdf, cell, edge as usize, &corner_values);
        }

        let face_normal = (positions[1] - positions[0]).cross(&(positions[2] - positions[0]));
        // A NaN anywhere in the cell ends up here and drops the triangle
        if !is_finite(&face_normal) || face_normal.norm() < DEGENERATE_FACE_NORMAL {
            continue;
        }

        // Outward normals point from material into empty space, against the gradient
        let mut normals = [Vector3::zeros(); 3];
        let mut degenerate = false;
        for (m, position) in positions.iter().enumerate() {
            let gradient = sdf.sample_gradient(values, position);
            let normal = -gradient / gradient.norm();
            if !is_finite(&normal) {
                degenerate = true;
                break;
            }
            normals[m] = normal;
        }
        if degenerate {
            continue;
        }

        // Make the winding agree with the gradient orientation
        if face_normal.dot(&(normals[0] + normals[1] + normals[2])) < 0.0 {
            positions.swap(1, 2);
            normals.swap(1, 2);
        }
        output.add_triangle(&positions, &normals);
    }
}

/// Interpolates the zero crossing on the given cube edge
fn edge_zero_crossing(
    sdf: &SdfGrid,
    cell: [i64; 3],
    edge: usize,
    corner_values: &[f32; 8],
) -> Vector3<f32> {
    let grid = sdf.grid();
    let (a, b) = EDGE_CORNERS[edge];
    let pa = grid.voxel_center_world([
        cell[0] + CORNER_OFFSETS[a][0],
        cell[1] + CORNER_OFFSETS[a][1],
        cell[2] + CORNER_OFFSETS[a][2],
    ]);
    let pb = grid.voxel_center_world([
        cell[0] + CORNER_OFFSETS[b][0],
        cell[1] + CORNER_OFFSETS[b][1],
        cell[2] + CORNER_OFFSETS[b][2],
    ]);
    let (fa, fb) = (corner_values[a], corner_values[b]);
    if (fa - fb).abs() < EDGE_INTERPOLATION_EPSILON {
        return pa;
    }
    lerp(&pa, &pb, fa / (fa - fb))
}
