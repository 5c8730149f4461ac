//! Voxel occupancy storage with change-region notification
//!
//! The [`VolumeStore`] is the ground truth for stock occupancy: a boolean per voxel
//! (`true` = material, `false` = removed), stored either as a dense bitmap backed by
//! atomic words or as a sparse voxel octree. Every mutating call that changes at
//! least one voxel publishes exactly one change-region event to all subscribers
//! after its writes are visible.

use crate::aabb::Aabb3;
use crate::uniform_grid::{GridConstructionError, UniformGrid, VoxelIndex, VoxelRegion};
use log::trace;
use nalgebra::Vector3;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Mutators whose candidate region is larger than this are parallelized over Z
const PARALLEL_VOXEL_THRESHOLD: i64 = 1000;

/// Slack on the projection parameter when testing voxels against a cylinder segment
const CYLINDER_ENDPOINT_EPSILON: f32 = 1e-5;

/// Segment length below which a cylinder removal degenerates to a sphere removal
const DEGENERATE_SEGMENT_LENGTH: f32 = 1e-6;

/// Selects the occupancy storage representation of a [`VolumeStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyKind {
    /// One bit per voxel, row-major in (x, then y, then z)
    Dense,
    /// Sparse voxel octree; uniform subcubes collapse to single leaves
    SparseOctree,
}

/// Opaque handle identifying a change-event subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type ChangeCallback = Arc<dyn Fn(&VoxelRegion) + Send + Sync>;

/// Dense occupancy bitmap over atomic words.
///
/// Readers are lock-free; concurrent mutators writing distinct voxels are
/// independent because all bit updates are atomic read-modify-write operations.
struct DenseBits {
    words: Vec<AtomicU64>,
}

impl DenseBits {
    fn new_all_material(n_bits: u64) -> Self {
        let n_words = ((n_bits + 63) / 64) as usize;
        Self {
            words: (0..n_words).map(|_| AtomicU64::new(!0u64)).collect(),
        }
    }

    fn get(&self, bit: u64) -> bool {
        let word = self.words[(bit / 64) as usize].load(Ordering::Acquire);
        (word >> (bit % 64)) & 1 != 0
    }

    /// Sets the bit to the given value, returns whether it changed
    fn set_value(&self, bit: u64, value: bool) -> bool {
        let word = &self.words[(bit / 64) as usize];
        let mask = 1u64 << (bit % 64);
        if value {
            word.fetch_or(mask, Ordering::AcqRel) & mask == 0
        } else {
            word.fetch_and(!mask, Ordering::AcqRel) & mask != 0
        }
    }

    fn fill_material(&self) {
        for word in &self.words {
            word.store(!0u64, Ordering::Release);
        }
    }
}

/// One node of the sparse occupancy octree; an absent child stands for "all material"
enum OctreeNode {
    Leaf(bool),
    Branch(Box<[Option<OctreeNode>; 8]>),
}

/// Sparse voxel octree over a power-of-two cube enclosing the grid
struct SparseOctree {
    root: OctreeNode,
    level: u32,
}

impl SparseOctree {
    fn new_all_material(dims: [i64; 3]) -> Self {
        let max_dim = dims.iter().copied().max().unwrap_or(1).max(1);
        let mut level = 0;
        while (1i64 << level) < max_dim {
            level += 1;
        }
        Self {
            root: OctreeNode::Leaf(true),
            level,
        }
    }

    fn fill_material(&mut self) {
        self.root = OctreeNode::Leaf(true);
    }

    fn get(&self, idx: VoxelIndex) -> bool {
        Self::get_node(&self.root, self.level, idx)
    }

    fn get_node(node: &OctreeNode, level: u32, idx: VoxelIndex) -> bool {
        match node {
            OctreeNode::Leaf(v) => *v,
            OctreeNode::Branch(children) => match &children[Self::octant(idx, level)] {
                None => true,
                Some(child) => Self::get_node(child, level - 1, idx),
            },
        }
    }

    /// Sets the voxel to the given value, returns whether it changed
    fn set(&mut self, idx: VoxelIndex, value: bool) -> bool {
        Self::set_node(&mut self.root, self.level, idx, value)
    }

    fn set_node(node: &mut OctreeNode, level: u32, idx: VoxelIndex, value: bool) -> bool {
        let changed = match node {
            OctreeNode::Leaf(v) if *v == value => false,
            OctreeNode::Leaf(v) => {
                if level == 0 {
                    *v = value;
                    true
                } else {
                    // Split the uniform leaf, then descend into the fresh branch
                    let old = *v;
                    *node = OctreeNode::Branch(Box::new(std::array::from_fn(|_| {
                        Some(OctreeNode::Leaf(old))
                    })));
                    return Self::set_node(node, level, idx, value);
                }
            }
            OctreeNode::Branch(children) => {
                let child = children[Self::octant(idx, level)].get_or_insert(OctreeNode::Leaf(true));
                Self::set_node(child, level - 1, idx, value)
            }
        };
        if changed {
            Self::try_collapse(node);
        }
        changed
    }

    /// Replaces a branch whose children are all uniform with the same value by a single leaf
    fn try_collapse(node: &mut OctreeNode) {
        if let OctreeNode::Branch(children) = node {
            let mut uniform: Option<bool> = None;
            for child in children.iter() {
                let value = match child {
                    None => true,
                    Some(OctreeNode::Leaf(v)) => *v,
                    Some(OctreeNode::Branch(_)) => return,
                };
                match uniform {
                    None => uniform = Some(value),
                    Some(u) if u == value => {}
                    _ => return,
                }
            }
            if let Some(value) = uniform {
                *node = OctreeNode::Leaf(value);
            }
        }
    }

    fn octant(idx: VoxelIndex, level: u32) -> usize {
        let b = level - 1;
        (((idx[0] >> b) & 1) | (((idx[1] >> b) & 1) << 1) | (((idx[2] >> b) & 1) << 2)) as usize
    }
}

enum OccupancyStorage {
    Dense(DenseBits),
    Sparse(RwLock<SparseOctree>),
}

/// Voxel occupancy of the stock with mutators for material removal.
///
/// Reads are lock-free in the dense representation and take a short read lock in
/// the sparse one. Mutators may run concurrently with readers (readers then see
/// pre- or post-state per voxel, never torn values) but must not run concurrently
/// with each other; callers serialize mutations.
pub struct VolumeStore {
    grid: UniformGrid,
    storage: OccupancyStorage,
    material_count: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, ChangeCallback)>>,
    next_subscription: AtomicU64,
}

impl VolumeStore {
    /// Constructs a dense store over the given domain with all voxels material
    pub fn new(domain: &Aabb3, resolution: f32) -> Result<Self, GridConstructionError> {
        Self::with_storage(domain, resolution, OccupancyKind::Dense)
    }

    /// Constructs a store with the chosen storage representation
    pub fn with_storage(
        domain: &Aabb3,
        resolution: f32,
        kind: OccupancyKind,
    ) -> Result<Self, GridConstructionError> {
        let grid = UniformGrid::new(domain, resolution)?;
        grid.log_grid_info();
        let n_voxels = grid.n_voxels();
        let storage = match kind {
            OccupancyKind::Dense => OccupancyStorage::Dense(DenseBits::new_all_material(n_voxels)),
            OccupancyKind::SparseOctree => {
                OccupancyStorage::Sparse(RwLock::new(SparseOctree::new_all_material(grid.dims())))
            }
        };
        Ok(Self {
            grid,
            storage,
            material_count: AtomicU64::new(n_voxels),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        })
    }

    /// Returns the underlying grid geometry
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    /// Returns the domain bounding box
    pub fn bounds(&self) -> &Aabb3 {
        self.grid.aabb()
    }

    /// Returns the voxel edge length in world units
    pub fn resolution(&self) -> f32 {
        self.grid.resolution()
    }

    /// Returns the number of voxels per axis
    pub fn dims(&self) -> [i64; 3] {
        self.grid.dims()
    }

    /// Returns the current number of material voxels
    pub fn count_material(&self) -> u64 {
        self.material_count.load(Ordering::Acquire)
    }

    /// Returns whether the given voxel holds material; out-of-range indices are empty
    pub fn is_material(&self, idx: VoxelIndex) -> bool {
        if !self.grid.is_inside(idx) {
            return false;
        }
        match &self.storage {
            OccupancyStorage::Dense(bits) => bits.get(self.grid.flat_index(idx) as u64),
            OccupancyStorage::Sparse(octree) => octree.read().get(idx),
        }
    }

    /// Returns whether the voxel containing the given world position holds material
    pub fn is_material_at_world(&self, p: &Vector3<f32>) -> bool {
        self.is_material(self.grid.world_to_voxel(p))
    }

    /// Registers a change-event callback, invoked after every mutation that changed at
    /// least one voxel with the inclusive voxel-index AABB of the change
    pub fn subscribe(
        &self,
        callback: impl Fn(&VoxelRegion) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::AcqRel));
        self.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Removes a subscription, returns whether it existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let len_before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != len_before
    }

    /// Removes all voxels whose center lies inside the closed sphere
    pub fn remove_sphere(&self, center: &Vector3<f32>, radius: f32) {
        profile!("VolumeStore::remove_sphere");

        let mut shape_aabb = Aabb3::new(*center, *center);
        shape_aabb.grow_uniformly(radius);
        let Some(region) = self.grid.clamp_region(&self.grid.enclosing_region(&shape_aabb)) else {
            return;
        };

        let c = *center;
        let r2 = radius * radius;
        let changed = self.remove_voxels_where(
            region,
            |y, z| {
                let dy = y - c.y;
                let dz = z - c.z;
                dy * dy + dz * dz <= r2
            },
            |p| (p - c).norm_squared() <= r2,
        );
        if let Some(changed_region) = changed {
            self.notify(&changed_region);
        }
    }

    /// Removes all voxels whose center lies inside the swept cylinder from `start` to
    /// `end`. With `flat_ends` the solid is cut off at the segment endpoints, without
    /// it the endpoints are capped by spheres (a capsule). Degenerate segments fall
    /// back to a sphere removal.
    pub fn remove_cylinder(
        &self,
        start: &Vector3<f32>,
        end: &Vector3<f32>,
        radius: f32,
        flat_ends: bool,
    ) {
        profile!("VolumeStore::remove_cylinder");

        let axis = end - start;
        let len2 = axis.norm_squared();
        if len2.sqrt() < DEGENERATE_SEGMENT_LENGTH {
            return self.remove_sphere(start, radius);
        }

        let mut shape_aabb = Aabb3::new(start.inf(end), start.sup(end));
        shape_aabb.grow_uniformly(radius);
        let Some(region) = self.grid.clamp_region(&self.grid.enclosing_region(&shape_aabb)) else {
            return;
        };

        let (a, b) = (*start, *end);
        let r2 = radius * radius;
        let changed = self.remove_voxels_where(
            region,
            |_, _| true,
            |p| {
                let rel = p - a;
                let t = rel.dot(&axis) / len2;
                if (-CYLINDER_ENDPOINT_EPSILON..=1.0 + CYLINDER_ENDPOINT_EPSILON).contains(&t) {
                    let perp = rel - axis * t;
                    if perp.norm_squared() <= r2 {
                        return true;
                    }
                }
                if !flat_ends {
                    return (p - a).norm_squared() <= r2 || (p - b).norm_squared() <= r2;
                }
                false
            },
        );
        if let Some(changed_region) = changed {
            self.notify(&changed_region);
        }
    }

    /// Sets a single voxel; out-of-range indices are clamped to the grid
    pub fn set(&self, idx: VoxelIndex, material: bool) {
        let idx = self.grid.clamp_index(idx);
        let changed = match &self.storage {
            OccupancyStorage::Dense(bits) => {
                bits.set_value(self.grid.flat_index(idx) as u64, material)
            }
            OccupancyStorage::Sparse(octree) => octree.write().set(idx, material),
        };
        if changed {
            if material {
                self.material_count.fetch_add(1, Ordering::AcqRel);
            } else {
                self.material_count.fetch_sub(1, Ordering::AcqRel);
            }
            self.notify(&VoxelRegion::single(idx));
        }
    }

    /// Removes the voxel containing the given world position (clamped to the grid)
    pub fn remove_voxel_at_world(&self, p: &Vector3<f32>) {
        self.set(self.grid.world_to_voxel(p), false);
    }

    /// Restores all voxels to material
    pub fn clear(&self) {
        let n_voxels = self.grid.n_voxels();
        let previous = self.material_count.load(Ordering::Acquire);
        match &self.storage {
            OccupancyStorage::Dense(bits) => bits.fill_material(),
            OccupancyStorage::Sparse(octree) => octree.write().fill_material(),
        }
        self.material_count.store(n_voxels, Ordering::Release);
        if previous != n_voxels {
            self.notify(&VoxelRegion::full_grid(&self.grid));
        }
    }

    /// Clears every voxel of the region whose center passes both filters; returns the
    /// tight region of actual changes and updates the material count.
    ///
    /// `row_filter` is a cheap pre-test on the (y, z) center coordinates of a whole
    /// X-row, `predicate` the exact test on the voxel center.
    fn remove_voxels_where<R, P>(
        &self,
        region: VoxelRegion,
        row_filter: R,
        predicate: P,
    ) -> Option<VoxelRegion>
    where
        R: Fn(f32, f32) -> bool + Sync,
        P: Fn(&Vector3<f32>) -> bool + Sync,
    {
        let parallel = region.voxel_count() > PARALLEL_VOXEL_THRESHOLD;

        let (n_changed, changed_region) = match &self.storage {
            OccupancyStorage::Dense(bits) => {
                let process_slice = |k: i64| -> (u64, Option<VoxelRegion>) {
                    let mut n_changed = 0u64;
                    let mut changed: Option<VoxelRegion> = None;
                    for j in region.min[1]..=region.max[1] {
                        let row_center = self.grid.voxel_center_world([region.min[0], j, k]);
                        if !row_filter(row_center.y, row_center.z) {
                            continue;
                        }
                        for i in region.min[0]..=region.max[0] {
                            let idx = [i, j, k];
                            if predicate(&self.grid.voxel_center_world(idx))
                                && bits.set_value(self.grid.flat_index(idx) as u64, false)
                            {
                                n_changed += 1;
                                changed = Some(match changed {
                                    Some(r) => r.union(&VoxelRegion::single(idx)),
                                    None => VoxelRegion::single(idx),
                                });
                            }
                        }
                    }
                    (n_changed, changed)
                };

                let merge = |a: (u64, Option<VoxelRegion>), b: (u64, Option<VoxelRegion>)| {
                    let region = match (a.1, b.1) {
                        (Some(ra), Some(rb)) => Some(ra.union(&rb)),
                        (ra, rb) => ra.or(rb),
                    };
                    (a.0 + b.0, region)
                };

                if parallel {
                    (region.min[2]..region.max[2] + 1)
                        .into_par_iter()
                        .map(process_slice)
                        .reduce(|| (0, None), merge)
                } else {
                    (region.min[2]..=region.max[2])
                        .map(process_slice)
                        .fold((0, None), merge)
                }
            }
            OccupancyStorage::Sparse(octree) => {
                // Candidate voxels are evaluated in parallel, the octree is mutated serially
                let collect_slice = |k: i64| -> Vec<VoxelIndex> {
                    let mut candidates = Vec::new();
                    for j in region.min[1]..=region.max[1] {
                        let row_center = self.grid.voxel_center_world([region.min[0], j, k]);
                        if !row_filter(row_center.y, row_center.z) {
                            continue;
                        }
                        for i in region.min[0]..=region.max[0] {
                            let idx = [i, j, k];
                            if predicate(&self.grid.voxel_center_world(idx)) {
                                candidates.push(idx);
                            }
                        }
                    }
                    candidates
                };

                let candidates: Vec<Vec<VoxelIndex>> = if parallel {
                    (region.min[2]..region.max[2] + 1)
                        .into_par_iter()
                        .map(collect_slice)
                        .collect()
                } else {
                    (region.min[2]..=region.max[2]).map(collect_slice).collect()
                };

                let mut octree = octree.write();
                let mut n_changed = 0u64;
                let mut changed: Option<VoxelRegion> = None;
                for idx in candidates.into_iter().flatten() {
                    if octree.set(idx, false) {
                        n_changed += 1;
                        changed = Some(match changed {
                            Some(r) => r.union(&VoxelRegion::single(idx)),
                            None => VoxelRegion::single(idx),
                        });
                    }
                }
                (n_changed, changed)
            }
        };

        if n_changed > 0 {
            self.material_count.fetch_sub(n_changed, Ordering::AcqRel);
            trace!(
                "Removed {} voxels in region {:?}",
                n_changed,
                changed_region
            );
        }
        changed_region
    }

    /// Publishes a change event to all subscribers, on the mutating thread
    fn notify(&self, region: &VoxelRegion) {
        let subscribers = self.subscribers.lock();
        for (_, callback) in subscribers.iter() {
            callback(region);
        }
    }
}
