//! Mapping pipeline configuration.

use crate::error::VyomaError;
use serde::{Deserialize, Serialize};

/// Configuration for the mapping pipeline.
///
/// The defaults reproduce the usual LOAM mapping setup: 3 m map voxels
/// with 0.2 m / 0.4 m downsampling leaves for corner and surf features.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Edge length of a map voxel in meters.
    pub grid_resolution: f32,

    /// Downsampling leaf size for corner (edge) feature clouds, meters.
    pub corner_leaf_size: f32,

    /// Downsampling leaf size for surf (planar) feature clouds, meters.
    pub surf_leaf_size: f32,

    /// Minimum corner points in the surround cloud before scan matching
    /// is attempted.
    pub min_corner_points: usize,

    /// Minimum surf points in the surround cloud before scan matching is
    /// attempted.
    pub min_surf_points: usize,

    /// Capacity of the odometry-to-mapping handoff queue.
    pub queue_capacity: usize,

    /// Drop backlogged frames instead of processing every one. Enable for
    /// live operation; disable for offline replay.
    pub real_time: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 3.0,
            corner_leaf_size: 0.2,
            surf_leaf_size: 0.4,
            min_corner_points: 10,
            min_surf_points: 50,
            queue_capacity: 16,
            real_time: true,
        }
    }
}

impl MappingConfig {
    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), VyomaError> {
        if self.grid_resolution <= 0.0 {
            return Err(VyomaError::Config(format!(
                "grid_resolution must be positive, got {}",
                self.grid_resolution
            )));
        }
        if self.corner_leaf_size <= 0.0 || self.surf_leaf_size <= 0.0 {
            return Err(VyomaError::Config(format!(
                "leaf sizes must be positive, got corner={} surf={}",
                self.corner_leaf_size, self.surf_leaf_size
            )));
        }
        if self.queue_capacity == 0 {
            return Err(VyomaError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.corner_leaf_size >= self.grid_resolution
            || self.surf_leaf_size >= self.grid_resolution
        {
            // Legal but wasteful: every voxel collapses to one point.
            log::warn!(
                "leaf sizes ({}, {}) not below grid resolution {}; map will be very sparse",
                self.corner_leaf_size,
                self.surf_leaf_size,
                self.grid_resolution
            );
        }
        Ok(())
    }
}
