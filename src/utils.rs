//! Small internal helpers shared across modules

use nalgebra::Vector3;

/// Linear interpolation between two points
pub(crate) fn lerp(a: &Vector3<f32>, b: &Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// Returns whether all components of the vector are finite
pub(crate) fn is_finite(v: &Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
