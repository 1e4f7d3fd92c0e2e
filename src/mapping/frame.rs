//! Odometry output consumed by the mapping thread.

use crate::core::{PointCloud3, Rigid3};

/// One laser-odometry result: feature clouds in the scan frame plus the
/// odometry pose estimate for that scan.
#[derive(Clone, Debug, Default)]
pub struct OdometryFrame {
    /// Acquisition time, microseconds since epoch.
    pub timestamp_us: u64,
    /// Scan pose estimated by the odometry front end (odom frame).
    pub odom_pose: Rigid3,
    /// Corner (edge) feature points, scan frame.
    pub cloud_corner: PointCloud3,
    /// Surf (planar) feature points, scan frame.
    pub cloud_surf: PointCloud3,
}

impl OdometryFrame {
    /// Create a frame from its parts.
    pub fn new(
        timestamp_us: u64,
        odom_pose: Rigid3,
        cloud_corner: PointCloud3,
        cloud_surf: PointCloud3,
    ) -> Self {
        Self {
            timestamp_us,
            odom_pose,
            cloud_corner,
            cloud_surf,
        }
    }

    /// Total feature points carried by this frame.
    pub fn point_count(&self) -> usize {
        self.cloud_corner.len() + self.cloud_surf.len()
    }
}
