//! Scan-to-map matcher seam.

use crate::core::{PointCloud3, Rigid3};

/// Refines a pose estimate by aligning the current scan's features against
/// the surround clouds retrieved from the map.
///
/// The mapping thread calls this once per frame when the surround clouds
/// carry enough evidence. Implementations are expected to be deterministic
/// for identical inputs.
pub trait ScanMatcher {
    /// Refine `pose` (scan-to-map) in place.
    ///
    /// `map_corner`/`map_surf` are the corner and surf surround clouds in
    /// the map frame; `scan_corner`/`scan_surf` are the downsampled feature
    /// clouds of the current scan in the scan frame.
    fn refine(
        &self,
        map_corner: &PointCloud3,
        map_surf: &PointCloud3,
        scan_corner: &PointCloud3,
        scan_surf: &PointCloud3,
        pose: &mut Rigid3,
    );
}

/// Matcher that accepts the incoming pose estimate unchanged.
///
/// Useful for replaying recorded trajectories and for tests where the
/// odometry pose is already exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughMatcher;

impl ScanMatcher for PassthroughMatcher {
    fn refine(
        &self,
        _map_corner: &PointCloud3,
        _map_surf: &PointCloud3,
        _scan_corner: &PointCloud3,
        _scan_surf: &PointCloud3,
        _pose: &mut Rigid3,
    ) {
    }
}
