//! Cutting tool geometry

use nalgebra::{Rotation3, Vector3};

/// An end mill, described by its cutter diameter and flute length
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tool {
    /// Flat end mill: a cylinder with a flat tip
    Flat { diameter: f32, length: f32 },
    /// Ball end mill: a cylinder with a hemispherical tip
    Ball { diameter: f32, length: f32 },
}

impl Tool {
    /// Returns the cutter radius
    pub fn radius(&self) -> f32 {
        match self {
            Tool::Flat { diameter, .. } | Tool::Ball { diameter, .. } => diameter * 0.5,
        }
    }

    /// Returns the flute length
    pub fn length(&self) -> f32 {
        match self {
            Tool::Flat { length, .. } | Tool::Ball { length, .. } => *length,
        }
    }

    /// Returns whether the tip is ball shaped
    pub fn is_ball_end(&self) -> bool {
        matches!(self, Tool::Ball { .. })
    }

    /// Returns the cutter radius at the given height above the tip.
    ///
    /// For a flat end mill the profile is constant; for a ball end mill the radius
    /// follows the hemisphere up to the cutter radius. Heights above the flute
    /// length return zero.
    pub fn radius_at_height(&self, height: f32) -> f32 {
        if height < 0.0 || height > self.length() {
            return 0.0;
        }
        match self {
            Tool::Flat { diameter, .. } => diameter * 0.5,
            Tool::Ball { diameter, .. } => {
                let radius = diameter * 0.5;
                if height >= radius {
                    radius
                } else {
                    let offset = radius - height;
                    (radius * radius - offset * offset).sqrt()
                }
            }
        }
    }
}

/// Tool orientation for 5-axis motion, given as intrinsic Euler angles applied in
/// Z, then Y, then X order to the default downward (-Z) tool direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolOrientation {
    /// Rotation angles around the (x, y, z) axes in radians
    pub angles: Vector3<f32>,
}

impl ToolOrientation {
    /// The default orientation: tool pointing straight down
    pub fn down() -> Self {
        Self {
            angles: Vector3::zeros(),
        }
    }

    /// Constructs an orientation from rotation angles around the (x, y, z) axes
    pub fn from_angles(angles: Vector3<f32>) -> Self {
        Self { angles }
    }

    /// Returns the unit direction the tool tip points in
    pub fn direction(&self) -> Vector3<f32> {
        Rotation3::from_euler_angles(self.angles.x, self.angles.y, self.angles.z)
            * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Linear interpolation of the angles between two orientations
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            angles: self.angles + (other.angles - self.angles) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_flat_profile() {
        let tool = Tool::Flat {
            diameter: 6.0,
            length: 20.0,
        };
        assert_eq!(tool.radius(), 3.0);
        assert!(!tool.is_ball_end());
        assert_eq!(tool.radius_at_height(0.0), 3.0);
        assert_eq!(tool.radius_at_height(10.0), 3.0);
        assert_eq!(tool.radius_at_height(25.0), 0.0);
        assert_eq!(tool.radius_at_height(-1.0), 0.0);
    }

    #[test]
    fn test_ball_profile() {
        let tool = Tool::Ball {
            diameter: 6.0,
            length: 20.0,
        };
        assert!(tool.is_ball_end());
        // Zero at the very tip, full radius from the hemisphere equator upwards
        assert_eq!(tool.radius_at_height(0.0), 0.0);
        assert_eq!(tool.radius_at_height(3.0), 3.0);
        assert_eq!(tool.radius_at_height(10.0), 3.0);
        // Halfway up the hemisphere
        let h = 1.5;
        let expected = (9.0f32 - 1.5 * 1.5).sqrt();
        assert!((tool.radius_at_height(h) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_default_down() {
        let down = ToolOrientation::down().direction();
        assert!((down - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_orientation_tilt() {
        // Tilting 90 degrees around Y points the tool along -X
        let tilted = ToolOrientation::from_angles(Vector3::new(0.0, FRAC_PI_2, 0.0));
        let direction = tilted.direction();
        assert!((direction - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_orientation_lerp() {
        let a = ToolOrientation::down();
        let b = ToolOrientation::from_angles(Vector3::new(0.0, FRAC_PI_2, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert!((mid.angles.y - FRAC_PI_2 * 0.5).abs() < 1e-6);
        assert!((mid.direction().norm() - 1.0).abs() < 1e-6);
    }
}
