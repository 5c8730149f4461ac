//! The uniform background grid shared by occupancy, SDF and surface extraction

use crate::aabb::Aabb3;
use log::info;
use nalgebra::Vector3;
use thiserror::Error as ThisError;

/// A voxel index triple `(i, j, k)`; values outside `[0, dims)` are legal for queries
pub type VoxelIndex = [i64; 3];

/// Error type for the construction of a [`UniformGrid`]
#[derive(Clone, Debug, ThisError)]
pub enum GridConstructionError {
    /// The resolution (voxel edge length) is zero, negative or not finite
    #[error("invalid resolution: {0}")]
    InvalidResolution(f32),
    /// The domain bounding box is inverted or degenerate
    #[error("invalid domain bounds")]
    InvalidBounds,
    /// The number of voxels overflows the index space
    #[error("grid size overflow")]
    SizeOverflow,
}

/// A uniform voxel grid over an axis-aligned domain.
///
/// The grid is the triple of domain bounds, voxel edge length (`resolution`) and
/// per-axis voxel counts `dims = ceil(extents / resolution)`. Voxel `(i, j, k)` is
/// the cube starting at `bounds.min + (i, j, k) * resolution`, its center sits at
/// `bounds.min + (i + 1/2, j + 1/2, k + 1/2) * resolution`. All index mapping
/// functions are total: out-of-range indices map to virtual voxel positions
/// outside of the domain.
#[derive(Clone, Debug)]
pub struct UniformGrid {
    aabb: Aabb3,
    resolution: f32,
    dims: [i64; 3],
}

/// An inclusive axis-aligned box of voxel indices, used for mutation candidates and change events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelRegion {
    /// Minimum voxel index contained in the region
    pub min: VoxelIndex,
    /// Maximum voxel index contained in the region (inclusive)
    pub max: VoxelIndex,
}

impl UniformGrid {
    /// Constructs a grid over the given domain, fails on non-positive resolution, inverted bounds or index overflow
    pub fn new(domain: &Aabb3, resolution: f32) -> Result<Self, GridConstructionError> {
        if !(resolution > 0.0) || !resolution.is_finite() {
            return Err(GridConstructionError::InvalidResolution(resolution));
        }
        if !domain.is_consistent() {
            return Err(GridConstructionError::InvalidBounds);
        }

        let extents = domain.extents();
        let dims = [
            (extents.x / resolution).ceil() as i64,
            (extents.y / resolution).ceil() as i64,
            (extents.z / resolution).ceil() as i64,
        ];
        if dims.iter().any(|&n| n < 1) {
            return Err(GridConstructionError::InvalidBounds);
        }

        dims[0]
            .checked_mul(dims[1])
            .and_then(|xy| xy.checked_mul(dims[2]))
            .ok_or(GridConstructionError::SizeOverflow)?;

        Ok(Self {
            aabb: domain.clone(),
            resolution,
            dims,
        })
    }

    /// Returns the domain bounding box
    pub fn aabb(&self) -> &Aabb3 {
        &self.aabb
    }

    /// Returns the voxel edge length in world units
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Returns the number of voxels per axis
    pub fn dims(&self) -> [i64; 3] {
        self.dims
    }

    /// Returns the total number of voxels in the grid
    pub fn n_voxels(&self) -> u64 {
        self.dims.iter().map(|&n| n as u64).product()
    }

    /// Returns whether the given index identifies an interior voxel
    pub fn is_inside(&self, idx: VoxelIndex) -> bool {
        idx[0] >= 0
            && idx[1] >= 0
            && idx[2] >= 0
            && idx[0] < self.dims[0]
            && idx[1] < self.dims[1]
            && idx[2] < self.dims[2]
    }

    /// Maps a world position to the index of the voxel containing it (closed on the min face, open on the max face).
    ///
    /// The returned index may be out of range for positions outside of the domain.
    pub fn world_to_voxel(&self, p: &Vector3<f32>) -> VoxelIndex {
        let rel = (p - self.aabb.min()) / self.resolution;
        [
            rel.x.floor() as i64,
            rel.y.floor() as i64,
            rel.z.floor() as i64,
        ]
    }

    /// Returns the world position of the center of the given voxel (also for out-of-range indices)
    pub fn voxel_center_world(&self, idx: VoxelIndex) -> Vector3<f32> {
        self.aabb.min()
            + Vector3::new(
                (idx[0] as f32 + 0.5) * self.resolution,
                (idx[1] as f32 + 0.5) * self.resolution,
                (idx[2] as f32 + 0.5) * self.resolution,
            )
    }

    /// Returns the world-space bounding box of the given voxel
    pub fn voxel_aabb_world(&self, idx: VoxelIndex) -> Aabb3 {
        let min = self.aabb.min()
            + Vector3::new(
                idx[0] as f32 * self.resolution,
                idx[1] as f32 * self.resolution,
                idx[2] as f32 * self.resolution,
            );
        Aabb3::new(min, min + Vector3::repeat(self.resolution))
    }

    /// Clamps the given index to the valid index range per axis
    pub fn clamp_index(&self, idx: VoxelIndex) -> VoxelIndex {
        [
            idx[0].max(0).min(self.dims[0] - 1),
            idx[1].max(0).min(self.dims[1] - 1),
            idx[2].max(0).min(self.dims[2] - 1),
        ]
    }

    /// Clamps the given region to the grid, returns `None` if it does not overlap the grid at all
    pub fn clamp_region(&self, region: &VoxelRegion) -> Option<VoxelRegion> {
        let overlaps = (0..3).all(|d| {
            region.min[d] <= region.max[d] && region.max[d] >= 0 && region.min[d] < self.dims[d]
        });
        overlaps.then(|| VoxelRegion {
            min: self.clamp_index(region.min),
            max: self.clamp_index(region.max),
        })
    }

    /// Returns the (unclamped) region of voxels whose cubes can intersect the given world-space box
    pub fn enclosing_region(&self, aabb: &Aabb3) -> VoxelRegion {
        VoxelRegion {
            min: self.world_to_voxel(aabb.min()),
            max: self.world_to_voxel(aabb.max()),
        }
    }

    /// Returns the linearized index `i + j * nx + k * nx * ny` for an interior voxel
    pub fn flat_index(&self, idx: VoxelIndex) -> i64 {
        idx[0] + idx[1] * self.dims[0] + idx[2] * self.dims[0] * self.dims[1]
    }

    /// Logs the grid dimensions and domain
    pub fn log_grid_info(&self) {
        info!(
            "Grid: {}x{}x{} voxels ({} total) at resolution {}, domain {:?} to {:?}",
            self.dims[0],
            self.dims[1],
            self.dims[2],
            self.n_voxels(),
            self.resolution,
            self.aabb.min(),
            self.aabb.max()
        );
    }
}

impl VoxelRegion {
    /// A region containing exactly the given voxel
    pub fn single(idx: VoxelIndex) -> Self {
        Self { min: idx, max: idx }
    }

    /// The region covering the full grid
    pub fn full_grid(grid: &UniformGrid) -> Self {
        let dims = grid.dims();
        Self {
            min: [0, 0, 0],
            max: [dims[0] - 1, dims[1] - 1, dims[2] - 1],
        }
    }

    /// Number of voxels per axis
    pub fn extents(&self) -> [i64; 3] {
        [
            self.max[0] - self.min[0] + 1,
            self.max[1] - self.min[1] + 1,
            self.max[2] - self.min[2] + 1,
        ]
    }

    /// Total number of voxels in the region
    pub fn voxel_count(&self) -> i64 {
        let e = self.extents();
        e[0] * e[1] * e[2]
    }

    /// Returns whether the given voxel lies in the region
    pub fn contains(&self, idx: VoxelIndex) -> bool {
        (0..3).all(|d| idx[d] >= self.min[d] && idx[d] <= self.max[d])
    }

    /// Grows the region by the given number of voxels on all sides
    pub fn dilated(&self, voxels: i64) -> Self {
        Self {
            min: [
                self.min[0] - voxels,
                self.min[1] - voxels,
                self.min[2] - voxels,
            ],
            max: [
                self.max[0] + voxels,
                self.max[1] + voxels,
                self.max[2] + voxels,
            ],
        }
    }

    /// The smallest region containing both operands
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid() -> UniformGrid {
        UniformGrid::new(
            &Aabb3::new(Vector3::new(-10.0, -10.0, -10.0), Vector3::new(10.0, 10.0, 10.0)),
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_grid_construction() {
        let grid = unit_grid();
        assert_eq!(grid.dims(), [20, 20, 20]);
        assert_eq!(grid.n_voxels(), 8000);

        let domain = Aabb3::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        assert!(matches!(
            UniformGrid::new(&domain, 0.0),
            Err(GridConstructionError::InvalidResolution(_))
        ));
        assert!(matches!(
            UniformGrid::new(&domain, -1.0),
            Err(GridConstructionError::InvalidResolution(_))
        ));

        let inverted = Aabb3::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 1.0));
        assert!(matches!(
            UniformGrid::new(&inverted, 0.5),
            Err(GridConstructionError::InvalidBounds)
        ));
    }

    #[test]
    fn test_world_voxel_roundtrip() {
        let grid = unit_grid();
        assert_eq!(grid.world_to_voxel(&Vector3::new(0.0, 0.0, 0.0)), [10, 10, 10]);
        assert_eq!(
            grid.world_to_voxel(&Vector3::new(-10.0, -10.0, -10.0)),
            [0, 0, 0]
        );
        // Open on the max face: the max corner maps to the first out-of-range voxel
        assert_eq!(grid.world_to_voxel(&Vector3::new(10.0, 0.0, 0.0))[0], 20);

        let center = grid.voxel_center_world([0, 0, 0]);
        assert_eq!(center, Vector3::new(-9.5, -9.5, -9.5));
        assert_eq!(grid.world_to_voxel(&center), [0, 0, 0]);

        // Out-of-range voxel centers are extrapolated
        let outside = grid.voxel_center_world([-1, 0, 0]);
        assert_eq!(outside.x, -10.5);
    }

    #[test]
    fn test_voxel_aabb() {
        let grid = unit_grid();
        let aabb = grid.voxel_aabb_world([0, 0, 0]);
        assert_eq!(*aabb.min(), Vector3::new(-10.0, -10.0, -10.0));
        assert_eq!(*aabb.max(), Vector3::new(-9.0, -9.0, -9.0));
    }

    #[test]
    fn test_clamp_region() {
        let grid = unit_grid();
        let region = VoxelRegion {
            min: [-5, 3, 18],
            max: [4, 25, 22],
        };
        let clamped = grid.clamp_region(&region).unwrap();
        assert_eq!(clamped.min, [0, 3, 18]);
        assert_eq!(clamped.max, [4, 19, 19]);

        let outside = VoxelRegion {
            min: [30, 0, 0],
            max: [35, 5, 5],
        };
        assert!(grid.clamp_region(&outside).is_none());
    }

    #[test]
    fn test_enclosing_region_is_conservative() {
        let grid = unit_grid();
        let shape = Aabb3::new(Vector3::new(-1.2, -0.3, 0.0), Vector3::new(2.7, 0.3, 1.4));
        let region = grid.enclosing_region(&shape);
        // Every voxel whose center lies in the box is inside the region
        for k in 0..20 {
            for j in 0..20 {
                for i in 0..20 {
                    if shape.contains_point(&grid.voxel_center_world([i, j, k])) {
                        assert!(region.contains([i, j, k]));
                    }
                }
            }
        }
    }

    #[test]
    fn test_region_ops() {
        let region = VoxelRegion {
            min: [1, 1, 1],
            max: [3, 4, 5],
        };
        assert_eq!(region.extents(), [3, 4, 5]);
        assert_eq!(region.voxel_count(), 60);
        assert!(region.contains([2, 2, 2]));
        assert!(!region.contains([0, 2, 2]));

        let dilated = region.dilated(2);
        assert_eq!(dilated.min, [-1, -1, -1]);
        assert_eq!(dilated.max, [5, 6, 7]);
    }
}
