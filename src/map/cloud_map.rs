//! Voxel map whose cells aggregate point clouds.

use super::voxel_filter::CloudFilter;
use crate::core::{Point3, PointCloud3, Rigid3, VoxelCoord};
use crate::grid::VoxelMap;
use std::collections::{HashMap, HashSet};

/// A sparse voxel map that aggregates one point cloud per occupied voxel.
///
/// This is the map side of a LOAM-style mapping loop: scans already in the
/// map frame are folded in with [`insert_scan`](CloudMap::insert_scan), and
/// the matcher's reference cloud is assembled with
/// [`surrounded_cloud`](CloudMap::surrounded_cloud).
///
/// Points far from the origin force the underlying grid to grow; the hard
/// limit of voxel indices is ±8192 around the origin, so at meter-scale
/// resolutions the addressable region spans kilometers.
#[derive(Debug)]
pub struct CloudMap {
    map: VoxelMap<PointCloud3>,
}

impl CloudMap {
    /// Scan points farther than this from the sensor origin are ignored by
    /// [`surrounded_cloud`](CloudMap::surrounded_cloud) (meters).
    const MAX_SCAN_RANGE: f32 = 100.0;

    /// Create a map with voxels of edge length `resolution` meters.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is not strictly positive.
    pub fn new(resolution: f32) -> Self {
        Self {
            map: VoxelMap::new(resolution),
        }
    }

    /// Voxel edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.map.resolution()
    }

    /// Index of the voxel containing `point`.
    #[inline]
    pub fn cell_index(&self, point: Point3) -> VoxelCoord {
        self.map.cell_index(point)
    }

    /// Cloud stored in the voxel at `index`, if any points have reached it.
    #[inline]
    pub fn cell(&self, index: VoxelCoord) -> Option<&PointCloud3> {
        self.map.get(index).filter(|cloud| !cloud.is_empty())
    }

    /// Number of voxels currently holding at least one point.
    pub fn occupied_cells(&self) -> usize {
        self.iter().count()
    }

    /// Fold a scan (already transformed into the map frame) into the map.
    ///
    /// Every point is appended to its voxel's cloud, then each touched
    /// voxel is downsampled in place with `filter`. Voxels are never
    /// removed; an empty scan is a no-op.
    pub fn insert_scan<F: CloudFilter>(&mut self, scan: &PointCloud3, filter: &F) {
        if scan.is_empty() {
            return;
        }
        for point in scan.iter() {
            let index = self.map.cell_index(point);
            self.map.get_mut(index).push_point(point);
        }
        // One filter pass per touched voxel, however many points landed in it.
        let touched: HashSet<VoxelCoord> =
            scan.iter().map(|point| self.map.cell_index(point)).collect();
        for index in touched {
            filter.apply(self.map.get_mut(index));
        }
    }

    /// Assemble the union of clouds for all voxels the transformed scan
    /// touches.
    ///
    /// A scan point is considered only if its range in the scan's own frame
    /// is at most 100 m; retained points are mapped through `pose` (applied
    /// in single precision) to find their voxel. Each touched occupied
    /// voxel contributes its cloud exactly once. The map is not modified
    /// and no cells are allocated.
    pub fn surrounded_cloud(&self, scan: &PointCloud3, pose: &Rigid3) -> PointCloud3 {
        let pose = pose.to_f32();
        let mut touched: HashMap<VoxelCoord, &PointCloud3> = HashMap::new();
        for point in scan.iter() {
            if point.norm() > Self::MAX_SCAN_RANGE {
                continue;
            }
            let index = self.map.cell_index(pose.transform_point(point));
            if let Some(cloud) = self.cell(index) {
                touched.insert(index, cloud);
            }
        }

        let total: usize = touched.values().map(|cloud| cloud.len()).sum();
        let mut surround = PointCloud3::with_capacity(total);
        for cloud in touched.values() {
            surround.extend_from(cloud);
        }
        surround
    }

    /// Iterate over all occupied voxels as `(signed index, cloud)`, in the
    /// grid's deterministic z-major order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &PointCloud3)> + '_ {
        self.map.iter()
    }
}
