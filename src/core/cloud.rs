//! 3D point cloud with SoA (Struct of Arrays) layout.
//!
//! Coordinates are stored in separate `xs`/`ys`/`zs` arrays. The layout is
//! cache-friendly for the sequential passes the map performs (transform,
//! voxel binning, concatenation) and auto-vectorizes well.

use super::point::Point3;
use super::transform::Rigid3f;

/// Cartesian 3D point cloud with SoA layout.
///
/// An empty cloud is the `Default` value; voxel cells hold one of these and
/// an empty cell is indistinguishable from a never-written one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud3 {
    /// X coordinates in meters
    pub xs: Vec<f32>,
    /// Y coordinates in meters
    pub ys: Vec<f32>,
    /// Z coordinates in meters
    pub zs: Vec<f32>,
}

impl PointCloud3 {
    /// Create a new empty point cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a point cloud with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
        }
    }

    /// Create from a slice of points.
    pub fn from_points(points: &[Point3]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for p in points {
            cloud.push_point(*p);
        }
        cloud
    }

    /// Add a point to the cloud.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
    }

    /// Add a `Point3` to the cloud.
    #[inline]
    pub fn push_point(&mut self, point: Point3) {
        self.push(point.x, point.y, point.z);
    }

    /// Number of points in the cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Get a point by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point3> {
        if index < self.len() {
            Some(Point3::new(self.xs[index], self.ys[index], self.zs[index]))
        } else {
            None
        }
    }

    /// Append all points of `other` to this cloud.
    pub fn extend_from(&mut self, other: &PointCloud3) {
        self.xs.extend_from_slice(&other.xs);
        self.ys.extend_from_slice(&other.ys);
        self.zs.extend_from_slice(&other.zs);
    }

    /// Transform the point cloud by a rigid transform, returning a new cloud.
    pub fn transform(&self, pose: &Rigid3f) -> Self {
        let mut result = Self::with_capacity(self.len());
        for p in self.iter() {
            result.push_point(pose.transform_point(p));
        }
        result
    }

    /// Compute the bounding box, or `None` if the cloud is empty.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut points = self.iter();
        let first = points.next()?;
        let mut min = first;
        let mut max = first;
        for p in points {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some((min, max))
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = Point3> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.zs)
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    /// Clear all points.
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.zs.clear();
    }
}
