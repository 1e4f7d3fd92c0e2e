//! Point-cloud voxel map and its downsampling filter.

mod cloud_map;
mod voxel_filter;

pub use cloud_map::CloudMap;
pub use voxel_filter::{CloudFilter, VoxelGridFilter};
