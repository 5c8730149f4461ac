//! Helper types for cartesian coordinate system topology

use nalgebra::Vector3;

/// The cartesian coordinate axes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the dimension index of the axis (x = 0, y = 1, z = 2)
    pub fn dim(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six axis-aligned face directions of a voxel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceDirection {
    XNeg,
    XPos,
    YNeg,
    YPos,
    ZNeg,
    ZPos,
}

impl FaceDirection {
    /// All six face directions
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::XNeg,
        FaceDirection::XPos,
        FaceDirection::YNeg,
        FaceDirection::YPos,
        FaceDirection::ZNeg,
        FaceDirection::ZPos,
    ];

    /// Returns the axis the face is perpendicular to
    pub fn axis(&self) -> Axis {
        match self {
            FaceDirection::XNeg | FaceDirection::XPos => Axis::X,
            FaceDirection::YNeg | FaceDirection::YPos => Axis::Y,
            FaceDirection::ZNeg | FaceDirection::ZPos => Axis::Z,
        }
    }

    /// Returns the index offset towards the neighboring voxel behind the face
    pub fn index_offset(&self) -> [i64; 3] {
        match self {
            FaceDirection::XNeg => [-1, 0, 0],
            FaceDirection::XPos => [1, 0, 0],
            FaceDirection::YNeg => [0, -1, 0],
            FaceDirection::YPos => [0, 1, 0],
            FaceDirection::ZNeg => [0, 0, -1],
            FaceDirection::ZPos => [0, 0, 1],
        }
    }

    /// Returns the outward unit normal of the face
    pub fn normal(&self) -> Vector3<f32> {
        let o = self.index_offset();
        Vector3::new(o[0] as f32, o[1] as f32, o[2] as f32)
    }
}

/// Index offsets of the full 26-neighborhood of a voxel
#[rustfmt::skip]
pub const NEIGHBORHOOD_26: [[i64; 3]; 26] = [
    [-1, -1, -1], [ 0, -1, -1], [ 1, -1, -1],
    [-1,  0, -1], [ 0,  0, -1], [ 1,  0, -1],
    [-1,  1, -1], [ 0,  1, -1], [ 1,  1, -1],
    [-1, -1,  0], [ 0, -1,  0], [ 1, -1,  0],
    [-1,  0,  0],               [ 1,  0,  0],
    [-1,  1,  0], [ 0,  1,  0], [ 1,  1,  0],
    [-1, -1,  1], [ 0, -1,  1], [ 1, -1,  1],
    [-1,  0,  1], [ 0,  0,  1], [ 1,  0,  1],
    [-1,  1,  1], [ 0,  1,  1], [ 1,  1,  1],
];
