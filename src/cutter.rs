//! Swept-volume removal for a moving tool
//!
//! A stateless orchestrator that decomposes linear tool motions into the sphere
//! and cylinder removals of the active backend. Works identically against the
//! boolean occupancy volume and the signed distance field.

use crate::sdf::SdfGrid;
use crate::tool::{Tool, ToolOrientation};
use crate::utils::lerp;
use crate::volume_store::VolumeStore;
use log::trace;
use nalgebra::Vector3;
use std::sync::Arc;

/// Motion length below which a segment cut degenerates to a point cut
const POINT_CUT_LENGTH: f32 = 1e-6;

/// The simulation backend a cutter mutates: either the occupancy volume or the
/// signed distance field, dispatching the primitive removals internally
pub enum CutterBackend {
    Voxel(Arc<VolumeStore>),
    Sdf(SdfGrid),
}

impl CutterBackend {
    /// Returns the voxel edge length of the backend grid
    pub fn resolution(&self) -> f32 {
        match self {
            CutterBackend::Voxel(store) => store.resolution(),
            CutterBackend::Sdf(sdf) => sdf.resolution(),
        }
    }

    /// Removes a sphere of material
    pub fn remove_sphere(&self, center: &Vector3<f32>, radius: f32) {
        match self {
            CutterBackend::Voxel(store) => store.remove_sphere(center, radius),
            CutterBackend::Sdf(sdf) => sdf.remove_sphere(center, radius),
        }
    }

    /// Removes a cylinder (capsule when `flat_ends` is false) of material
    pub fn remove_cylinder(
        &self,
        start: &Vector3<f32>,
        end: &Vector3<f32>,
        radius: f32,
        flat_ends: bool,
    ) {
        match self {
            CutterBackend::Voxel(store) => store.remove_cylinder(start, end, radius, flat_ends),
            CutterBackend::Sdf(sdf) => sdf.remove_cylinder(start, end, radius, flat_ends),
        }
    }

    /// Cuts a linear 3-axis motion of the tool tip from `p0` to `p1`.
    ///
    /// The swept volume is the tip path, the shaft column above it, and the
    /// quadrilateral between them bridged by sampled vertical columns.
    pub fn cut_segment(&self, tool: &Tool, p0: &Vector3<f32>, p1: &Vector3<f32>) {
        let motion = p1 - p0;
        let length = motion.norm();
        if length < POINT_CUT_LENGTH {
            return self.cut_point(tool, p0);
        }

        let radius = tool.radius();
        let shaft = Vector3::new(0.0, 0.0, tool.length());

        // Tip sweep; the ball tip rounds the segment ends into a capsule
        self.remove_cylinder(p0, p1, radius, !tool.is_ball_end());
        // Shaft sweep
        self.remove_cylinder(&(p0 + shaft), &(p1 + shaft), radius, true);

        // Bridge the swept quadrilateral with vertical columns
        let spacing = (radius * 0.5).min(2.0 * self.resolution());
        let n = ((length / spacing).ceil() as usize).max(2);
        trace!("Segment cut of length {} bridged by {} columns", length, n + 1);
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let base = lerp(p0, p1, t);
            self.remove_cylinder(&base, &(base + shaft), radius, true);
        }
    }

    /// Cuts a linear 5-axis motion with the tool orientation interpolated between
    /// the segment endpoints. Each step removes the tip sphere and the shaft
    /// cylinder along the oriented tool axis.
    pub fn cut_segment_5axis(
        &self,
        tool: &Tool,
        p0: &Vector3<f32>,
        o0: &ToolOrientation,
        p1: &Vector3<f32>,
        o1: &ToolOrientation,
    ) {
        let length = (p1 - p0).norm();
        let radius = tool.radius();
        let steps = ((length / (2.5 * self.resolution())).ceil() as usize).max(1);
        trace!("5-axis cut of length {} in {} steps", length, steps);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let tip = lerp(p0, p1, t);
            let direction = o0.lerp(o1, t).direction();
            let shaft_end = tip - direction * tool.length();
            self.remove_sphere(&tip, radius);
            self.remove_cylinder(&tip, &shaft_end, radius, true);
        }
    }

    /// Cuts at a single position: the tip sphere plus the vertical shaft column
    pub fn cut_point(&self, tool: &Tool, p: &Vector3<f32>) {
        let radius = tool.radius();
        let shaft = Vector3::new(0.0, 0.0, tool.length());
        self.remove_sphere(p, radius);
        self.remove_cylinder(p, &(p + shaft), radius, true);
    }
}
