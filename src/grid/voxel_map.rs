//! Metric facade over the grid stack.

use super::dynamic::DynamicGrid;
use crate::core::{Point3, VoxelCoord};

/// A sparse voxel grid with metric semantics.
///
/// The voxel at index `(0, 0, 0)` is centered on the origin; a point maps
/// to the voxel whose center is nearest (ties round to the even index,
/// uniformly across axes).
#[derive(Debug)]
pub struct VoxelMap<V> {
    resolution: f32,
    grid: DynamicGrid<V>,
}

impl<V: Default + PartialEq> VoxelMap<V> {
    /// Create a map with voxels of edge length `resolution` meters.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is not strictly positive.
    pub fn new(resolution: f32) -> Self {
        assert!(resolution > 0.0, "resolution must be positive");
        Self {
            resolution,
            grid: DynamicGrid::new(),
        }
    }

    /// Voxel edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Index of the voxel containing `point`.
    #[inline]
    pub fn cell_index(&self, point: Point3) -> VoxelCoord {
        VoxelCoord::new(
            (point.x / self.resolution).round_ties_even() as i32,
            (point.y / self.resolution).round_ties_even() as i32,
            (point.z / self.resolution).round_ties_even() as i32,
        )
    }

    /// Center of the voxel at `index`.
    #[inline]
    pub fn cell_center(&self, index: VoxelCoord) -> Point3 {
        Point3::new(
            index.x as f32 * self.resolution,
            index.y as f32 * self.resolution,
            index.z as f32 * self.resolution,
        )
    }

    /// Value stored at the signed voxel `index`, or `None` if never
    /// written or outside the current extent.
    #[inline]
    pub fn get(&self, index: VoxelCoord) -> Option<&V> {
        self.grid.get(index)
    }

    /// Mutable access to the cell at the signed voxel `index`, growing the
    /// underlying grid as needed.
    #[inline]
    pub fn get_mut(&mut self, index: VoxelCoord) -> &mut V {
        self.grid.get_mut(index)
    }

    /// Iterate over all non-default cells with their signed voxel indices.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &V)> + '_ {
        self.grid.iter()
    }
}
