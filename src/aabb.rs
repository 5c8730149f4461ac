//! Axis-aligned bounding boxes in world units

use nalgebra::Vector3;

/// An axis-aligned bounding box given by its minimum and maximum corner
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb3 {
    min: Vector3<f32>,
    max: Vector3<f32>,
}

impl Aabb3 {
    /// Constructs a bounding box with the given min and max corners
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Constructs the smallest bounding box containing all of the given points, returns `None` if the slice is empty
    pub fn from_points(points: &[Vector3<f32>]) -> Option<Self> {
        let mut iter = points.iter();
        let first = iter.next()?;
        let mut aabb = Self::new(*first, *first);
        for p in iter {
            aabb.join_with_point(p);
        }
        Some(aabb)
    }

    /// Returns the minimum corner
    pub fn min(&self) -> &Vector3<f32> {
        &self.min
    }

    /// Returns the maximum corner
    pub fn max(&self) -> &Vector3<f32> {
        &self.max
    }

    /// Returns whether the min corner is strictly smaller than the max corner per component
    pub fn is_consistent(&self) -> bool {
        self.min.x < self.max.x && self.min.y < self.max.y && self.min.z < self.max.z
    }

    /// Returns the side lengths of the box
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Returns the center of the box
    pub fn centroid(&self) -> Vector3<f32> {
        self.min + 0.5 * (self.max - self.min)
    }

    /// Returns whether the given point is inside the box (closed on the min face, open on the max face)
    pub fn contains_point(&self, p: &Vector3<f32>) -> bool {
        p.x >= self.min.x
            && p.y >= self.min.y
            && p.z >= self.min.z
            && p.x < self.max.x
            && p.y < self.max.y
            && p.z < self.max.z
    }

    /// Grows the box uniformly by the given margin on all sides
    pub fn grow_uniformly(&mut self, margin: f32) {
        self.min -= Vector3::repeat(margin);
        self.max += Vector3::repeat(margin);
    }

    /// Enlarges the box to contain the given point
    pub fn join_with_point(&mut self, p: &Vector3<f32>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Returns the point inside the box closest to the given point (the point itself if it is inside)
    pub fn closest_point(&self, p: &Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
            p.z.max(self.min.z).min(self.max.z),
        )
    }

    /// Returns the Euclidean distance from the given point to the box surface, zero for points inside
    pub fn exterior_distance(&self, p: &Vector3<f32>) -> f32 {
        (p - self.closest_point(p)).norm()
    }
}
