//! Point and voxel coordinate types.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Voxel coordinates (signed integer cell indices).
///
/// The voxel grid is centered on the origin, so all three components may be
/// negative. Coordinates are hard-bounded to ±8192 per axis by the dynamic
/// grid layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelCoord {
    /// X cell index
    pub x: i32,
    /// Y cell index
    pub y: i32,
    /// Z cell index
    pub z: i32,
}

impl VoxelCoord {
    /// Create a new voxel coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate with all components equal.
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise division (caller guarantees non-negative operands).
    #[inline]
    pub fn div_floor_nonneg(self, divisor: i32) -> Self {
        debug_assert!(self.x >= 0 && self.y >= 0 && self.z >= 0);
        Self::new(self.x / divisor, self.y / divisor, self.z / divisor)
    }

    /// Manhattan distance to another coordinate.
    #[inline]
    pub fn manhattan_distance(&self, other: &VoxelCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}

impl Add for VoxelCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        VoxelCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for VoxelCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        VoxelCoord::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<i32> for VoxelCoord {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: i32) -> Self {
        VoxelCoord::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// Metric 3D point (meters, f32).
///
/// Coordinate frame follows ROS REP-103: X forward, Y left, Z up.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
}

impl Point3 {
    /// Origin.
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length (magnitude) of this point as a vector from the origin.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.squared_norm().sqrt()
    }

    /// Squared length (avoids the sqrt).
    #[inline]
    pub fn squared_norm(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3) -> f32 {
        (*self - *other).norm()
    }

    /// Dot product with another point (as vectors).
    #[inline]
    pub fn dot(&self, other: &Point3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (as vectors).
    #[inline]
    pub fn cross(&self, other: &Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}
