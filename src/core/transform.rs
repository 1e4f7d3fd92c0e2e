//! Rigid transforms for 3D poses.
//!
//! Poses accumulate in double precision (`Rigid3`) across the pipeline and
//! are downcast to single precision (`Rigid3f`) when applied to point
//! clouds, which store f32 coordinates.

use super::point::Point3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Double-precision 3D vector, used for pose translations.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3d {
    /// X component in meters
    pub x: f64,
    /// Y component in meters
    pub y: f64,
    /// Z component in meters
    pub z: f64,
}

impl Vec3d {
    /// Zero vector.
    pub const ZERO: Vec3d = Vec3d {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Length of the vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Cross product.
    #[inline]
    pub fn cross(&self, other: &Vec3d) -> Vec3d {
        Vec3d::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Downcast to f32.
    #[inline]
    pub fn to_f32(self) -> Point3 {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Add for Vec3d {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3d::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3d {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3d::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3d {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Vec3d::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// Unit quaternion (double precision), scalar-first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar part
    pub w: f64,
    /// Vector part, X
    pub x: f64,
    /// Vector part, Y
    pub y: f64,
    /// Vector part, Z
    pub z: f64,
}

impl Quaternion {
    /// Identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotation of `angle` radians about `axis` (need not be normalized).
    pub fn from_axis_angle(axis: Vec3d, angle: f64) -> Self {
        let norm = axis.norm();
        if norm == 0.0 {
            return Self::identity();
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        let s = sin / norm;
        Self {
            w: cos,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Rescale to unit length. Falls back to identity for a zero quaternion.
    pub fn normalized(self) -> Self {
        let n = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if n == 0.0 {
            return Self::identity();
        }
        Self {
            w: self.w / n,
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    /// Conjugate; equals the inverse for unit quaternions.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotate a vector: `q v q*`.
    #[inline]
    pub fn rotate(&self, v: Vec3d) -> Vec3d {
        // v' = v + 2w (u x v) + 2 (u x (u x v)) with u the vector part
        let u = Vec3d::new(self.x, self.y, self.z);
        let uv = u.cross(&v);
        let uuv = u.cross(&uv);
        v + uv * (2.0 * self.w) + uuv * 2.0
    }

    /// Downcast to f32.
    #[inline]
    pub fn to_f32(self) -> Quaternionf {
        Quaternionf {
            w: self.w as f32,
            x: self.x as f32,
            y: self.y as f32,
            z: self.z as f32,
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product; `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
    fn mul(self, o: Self) -> Self {
        Self {
            w: self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
            x: self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            y: self.w * o.y - self.x * o.z + self.y * o.w + self.z * o.x,
            z: self.w * o.z + self.x * o.y - self.y * o.x + self.z * o.w,
        }
    }
}

/// Unit quaternion (single precision).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternionf {
    /// Scalar part
    pub w: f32,
    /// Vector part, X
    pub x: f32,
    /// Vector part, Y
    pub y: f32,
    /// Vector part, Z
    pub z: f32,
}

impl Quaternionf {
    /// Identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate a point: `q p q*`.
    #[inline]
    pub fn rotate(&self, p: Point3) -> Point3 {
        let u = Point3::new(self.x, self.y, self.z);
        let up = u.cross(&p);
        let uup = u.cross(&up);
        p + up * (2.0 * self.w) + uup * 2.0
    }
}

impl Default for Quaternionf {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rigid transform in double precision: `p -> R p + t`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rigid3 {
    /// Rotation part
    pub rotation: Quaternion,
    /// Translation part in meters
    pub translation: Vec3d,
}

impl Rigid3 {
    /// Identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            rotation: Quaternion::identity(),
            translation: Vec3d::ZERO,
        }
    }

    /// Create from translation and rotation.
    #[inline]
    pub const fn new(translation: Vec3d, rotation: Quaternion) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pure translation.
    #[inline]
    pub const fn from_translation(translation: Vec3d) -> Self {
        Self {
            rotation: Quaternion::identity(),
            translation,
        }
    }

    /// Apply to a point.
    #[inline]
    pub fn transform_point(&self, p: Vec3d) -> Vec3d {
        self.rotation.rotate(p) + self.translation
    }

    /// Compose with another transform; applies `other` first.
    #[inline]
    pub fn compose(&self, other: &Rigid3) -> Rigid3 {
        Rigid3 {
            rotation: (self.rotation * other.rotation).normalized(),
            translation: self.rotation.rotate(other.translation) + self.translation,
        }
    }

    /// Inverse transform.
    #[inline]
    pub fn inverse(&self) -> Rigid3 {
        let inv_rotation = self.rotation.conjugate();
        Rigid3 {
            rotation: inv_rotation,
            translation: inv_rotation.rotate(self.translation) * -1.0,
        }
    }

    /// Downcast to single precision for application to f32 point clouds.
    #[inline]
    pub fn to_f32(&self) -> Rigid3f {
        Rigid3f {
            rotation: self.rotation.to_f32(),
            translation: self.translation.to_f32(),
        }
    }
}

/// Rigid transform in single precision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rigid3f {
    /// Rotation part
    pub rotation: Quaternionf,
    /// Translation part in meters
    pub translation: Point3,
}

impl Rigid3f {
    /// Identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            rotation: Quaternionf::identity(),
            translation: Point3::ZERO,
        }
    }

    /// Apply to a point.
    #[inline]
    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.rotation.rotate(p) + self.translation
    }
}

impl Default for Rigid3f {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    const UNIT_Z: Vec3d = Vec3d {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    #[test]
    fn test_quaternion_rotate() {
        // 90 degrees about Z maps +X onto +Y
        let q = Quaternion::from_axis_angle(UNIT_Z, FRAC_PI_2);
        let v = q.rotate(Vec3d::new(1.0, 0.0, 0.0));

        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quaternion_product_order() {
        let a = Quaternion::from_axis_angle(UNIT_Z, FRAC_PI_2);
        let b = Quaternion::from_axis_angle(Vec3d::new(1.0, 0.0, 0.0), FRAC_PI_2);
        let v = Vec3d::new(0.0, 0.0, 1.0);

        let composed = (a * b).rotate(v);
        let sequential = a.rotate(b.rotate(v));

        assert_relative_eq!(composed.x, sequential.x, epsilon = 1e-12);
        assert_relative_eq!(composed.y, sequential.y, epsilon = 1e-12);
        assert_relative_eq!(composed.z, sequential.z, epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_transform_point() {
        let pose = Rigid3::new(
            Vec3d::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(UNIT_Z, FRAC_PI_2),
        );
        let p = pose.transform_point(Vec3d::new(1.0, 0.0, 0.0));

        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_compose_matches_sequential_application() {
        let a = Rigid3::new(
            Vec3d::new(0.5, -1.0, 2.0),
            Quaternion::from_axis_angle(Vec3d::new(0.3, 0.4, 0.5), 0.7),
        );
        let b = Rigid3::new(
            Vec3d::new(-2.0, 0.25, 1.5),
            Quaternion::from_axis_angle(Vec3d::new(-0.1, 0.9, 0.2), -1.2),
        );
        let p = Vec3d::new(3.0, -4.0, 5.0);

        let composed = a.compose(&b).transform_point(p);
        let sequential = a.transform_point(b.transform_point(p));

        assert_relative_eq!(composed.x, sequential.x, epsilon = 1e-9);
        assert_relative_eq!(composed.y, sequential.y, epsilon = 1e-9);
        assert_relative_eq!(composed.z, sequential.z, epsilon = 1e-9);
    }

    #[test]
    fn test_rigid_inverse_roundtrip() {
        let pose = Rigid3::new(
            Vec3d::new(1.0, 2.0, -3.0),
            Quaternion::from_axis_angle(Vec3d::new(1.0, 1.0, 0.0), 0.9),
        );
        let p = Vec3d::new(-0.5, 4.0, 2.5);

        let back = pose.inverse().transform_point(pose.transform_point(p));

        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-9);
    }

    #[test]
    fn test_downcast_preserves_rotation() {
        let pose = Rigid3::new(
            Vec3d::new(2.0, 0.0, 0.0),
            Quaternion::from_axis_angle(UNIT_Z, FRAC_PI_2),
        );
        let p = pose.to_f32().transform_point(Point3::new(1.0, 0.0, 0.0));

        assert_relative_eq!(p.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }
}
