//! In-place voxel-grid downsampling of point clouds.

use crate::core::PointCloud3;
use std::collections::BTreeMap;

/// An in-place point cloud downsampler.
///
/// Implementations replace the cloud's contents with a reduced version;
/// the map applies one per touched cell after scan insertion.
pub trait CloudFilter {
    /// Downsample `cloud` in place.
    fn apply(&self, cloud: &mut PointCloud3);
}

/// Any plain function over a cloud is usable as a filter.
impl<F: Fn(&mut PointCloud3)> CloudFilter for F {
    fn apply(&self, cloud: &mut PointCloud3) {
        self(cloud)
    }
}

/// Voxel-grid downsampler: bins points into cubic leaves of edge
/// `leaf_size` and keeps one centroid per occupied leaf.
///
/// The leaf size is chosen by the caller and should be smaller than the
/// map resolution it is paired with; a larger leaf is wasteful but not
/// incorrect. Output order follows ascending leaf coordinates, so the
/// result is independent of input order up to centroid averaging.
#[derive(Debug, Clone, Copy)]
pub struct VoxelGridFilter {
    leaf_size: f32,
}

impl VoxelGridFilter {
    /// Create a filter with cubic leaves of edge `leaf_size` meters.
    ///
    /// # Panics
    ///
    /// Panics if `leaf_size` is not strictly positive.
    pub fn new(leaf_size: f32) -> Self {
        assert!(leaf_size > 0.0, "leaf size must be positive");
        Self { leaf_size }
    }

    /// Leaf edge length in meters.
    #[inline]
    pub fn leaf_size(&self) -> f32 {
        self.leaf_size
    }
}

impl CloudFilter for VoxelGridFilter {
    fn apply(&self, cloud: &mut PointCloud3) {
        if cloud.is_empty() {
            return;
        }

        #[derive(Default)]
        struct Accumulator {
            sum_x: f64,
            sum_y: f64,
            sum_z: f64,
            count: u32,
        }

        let inv_leaf = 1.0 / self.leaf_size;
        let mut leaves: BTreeMap<(i32, i32, i32), Accumulator> = BTreeMap::new();
        for p in cloud.iter() {
            let key = (
                (p.x * inv_leaf).floor() as i32,
                (p.y * inv_leaf).floor() as i32,
                (p.z * inv_leaf).floor() as i32,
            );
            let acc = leaves.entry(key).or_default();
            acc.sum_x += p.x as f64;
            acc.sum_y += p.y as f64;
            acc.sum_z += p.z as f64;
            acc.count += 1;
        }

        let mut filtered = PointCloud3::with_capacity(leaves.len());
        for acc in leaves.values() {
            let n = acc.count as f64;
            filtered.push(
                (acc.sum_x / n) as f32,
                (acc.sum_y / n) as f32,
                (acc.sum_z / n) as f32,
            );
        }
        *cloud = filtered;
    }
}
