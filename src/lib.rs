//!
//! Library for simulating subtractive CNC milling on a voxel stock volume and
//! extracting a watertight triangle mesh of the machined surface.
//!
//! The pipeline has three stages: a [`VolumeStore`] holds the boolean occupancy
//! of the stock and publishes change-region events for every removal; a
//! [`SdfGrid`] maintains a narrow-band signed distance field over the same grid,
//! computed by fast sweeping and kept incrementally up to date through the change
//! events; the extractors turn either representation into a [`TriangleMesh3d`],
//! by marching cubes over the distance field ([`extract_from_sdf`]) or by direct
//! boundary-face extrusion of the occupancy ([`extract_from_volume`]).
//!
//! Sign convention of the distance field: **negative = empty/removed, positive =
//! material**.
//!

/// Re-export of the profiler crate, available with the `profiling` feature
#[cfg(feature = "profiling")]
pub use coarse_prof;
/// Re-export of the nalgebra version this crate is built against
pub use nalgebra;

#[cfg(feature = "profiling")]
/// Opens a coarse_prof scope for the expensive operations
macro_rules! profile {
    ($body:expr) => {
        coarse_prof::profile!($body);
    };
}

#[cfg(not(feature = "profiling"))]
/// Does nothing without the `profiling` feature
macro_rules! profile {
    ($body:expr) => {
        $body
    };
}

mod aabb;
/// Swept-volume removal for moving tools over either simulation backend
pub mod cutter;
/// Surface extraction directly from the occupancy volume (blocky voxel faces)
pub mod face_extrusion;
/// Isosurface extraction from the signed distance field by marching cubes
pub mod marching_cubes;
/// Triangle mesh type, vertex welding and binary STL export
pub mod mesh;
/// Narrow-band signed distance field with fast sweeping and analytic subtraction
pub mod sdf;
/// Cutting tool geometry and 5-axis orientation
pub mod tool;
/// Helper types for cartesian coordinate system topology
pub mod topology;
/// The uniform background grid shared by all components
pub mod uniform_grid;
/// Small internal helpers shared across modules
mod utils;
/// Voxel occupancy storage with change-region notification
pub mod volume_store;
/// Thread-local buffers for the parallel surface extractors
pub(crate) mod workspace;

use log::info;
use thiserror::Error as ThisError;

pub use aabb::Aabb3;
pub use cutter::CutterBackend;
pub use mesh::{save_binary_stl, write_binary_stl, TriangleMesh3d, VertexWelder};
pub use sdf::{SdfGrid, SdfParameters, DEFAULT_NARROW_BAND_WIDTH};
pub use tool::{Tool, ToolOrientation};
pub use uniform_grid::{GridConstructionError, UniformGrid, VoxelIndex, VoxelRegion};
pub use volume_store::{OccupancyKind, SubscriptionId, VolumeStore};

/// Fast non-cryptographic hash map used for the vertex welding dictionaries
pub(crate) type FxMap<K, V> = std::collections::HashMap<K, V, fxhash::FxBuildHasher>;
/// Concurrent variant backing the sparse distance storage
pub(crate) type FxDashMap<K, V> = dashmap::DashMap<K, V, fxhash::FxBuildHasher>;

/// Error type returned by the milling simulation
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum VoxcutError {
    /// Errors from the construction of the voxel grid underlying all components
    #[error("grid construction: {0}")]
    GridConstructionError(#[from] GridConstructionError),
    /// I/O errors from mesh export
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    /// Any error that is not represented by some other explicit variant
    #[error("unknown error")]
    Unknown(#[from] anyhow::Error),
}

/// Sizes rayon's global thread pool, which all parallel operations of this crate
/// run on.
///
/// The global pool can only be configured once per process, so a second call
/// returns an error. Calling this is optional; without it rayon sizes the pool to
/// the logical core count on first use.
pub fn initialize_thread_pool(num_threads: usize) -> Result<(), anyhow::Error> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;
    Ok(())
}

/// Extracts the blocky voxel surface of the stock directly from the occupancy volume
#[inline(never)]
pub fn extract_from_volume(store: &VolumeStore) -> TriangleMesh3d {
    profile!("extract_from_volume");
    face_extrusion::extract_from_volume(store)
}

/// Extracts the smooth zero isosurface of the signed distance field
#[inline(never)]
pub fn extract_from_sdf(sdf: &SdfGrid) -> TriangleMesh3d {
    profile!("extract_from_sdf");
    marching_cubes::extract_from_sdf(sdf)
}

/// Computes a distance field of the given band width from the occupancy volume and
/// extracts its isosurface
#[inline(never)]
pub fn extract_via_sdf(store: &VolumeStore, narrow_band_width: u32) -> TriangleMesh3d {
    profile!("extract_via_sdf");
    info!(
        "Extracting via intermediate SDF with band width {}",
        narrow_band_width
    );
    let parameters = SdfParameters {
        narrow_band_width,
        ..Default::default()
    };
    let sdf = SdfGrid::from_volume_store(store, &parameters);
    marching_cubes::extract_from_sdf(&sdf)
}
