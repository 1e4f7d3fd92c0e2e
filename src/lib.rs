//! # Vyoma-Map: Sparse 3D Voxel Mapping for LiDAR SLAM
//!
//! A sparse, dynamically growing, hierarchical 3D voxel grid used as the
//! spatial index over point clouds in a LiDAR odometry-and-mapping
//! pipeline. Points in metric space are quantized to integer voxel
//! coordinates at a configurable resolution; each occupied voxel owns a
//! small aggregated point cloud that is downsampled in place as scans
//! accumulate.
//!
//! ## Quick Start
//!
//! ```rust
//! use vyoma_map::core::{Point3, PointCloud3, Rigid3};
//! use vyoma_map::map::{CloudMap, VoxelGridFilter};
//!
//! // 1 m voxels; the filter keeps one centroid per 10 cm leaf.
//! let mut map = CloudMap::new(1.0);
//! let filter = VoxelGridFilter::new(0.1);
//!
//! let scan = PointCloud3::from_points(&[
//!     Point3::new(0.2, 0.0, 0.0),
//!     Point3::new(4.1, 0.3, -0.2),
//! ]);
//! map.insert_scan(&scan, &filter);
//!
//! // Reference cloud for scan matching around the same location.
//! let surround = map.surrounded_cloud(&scan, &Rigid3::identity());
//! assert_eq!(surround.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! Storage is a stack of three grid layers, each keeping memory
//! proportional to occupancy while preserving constant-time random access:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  mapping/                     │  ← thread driver
//! │     (odometry handoff, matcher seam)          │
//! └───────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────────────────────────┐
//! │                    map/                       │  ← domain layer
//! │       (CloudMap, voxel-grid filter)           │
//! └───────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────────────────────────┐
//! │                   grid/                       │  ← storage stack
//! │   (VoxelMap → DynamicGrid → NestedGrid →      │
//! │    FlatGrid)                                  │
//! └───────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────────────────────────┐
//! │                   core/                       │  ← foundation
//! │  (Point3, VoxelCoord, PointCloud3, Rigid3)    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The innermost [`grid::FlatGrid`] is a dense 8³ block; a
//! [`grid::NestedGrid`] holds 8³ lazily allocated blocks; the outer
//! [`grid::DynamicGrid`] is centered on the origin and doubles its extent
//! whenever a write lands outside, up to a hard bound of ±8192 voxels per
//! axis. Iteration over any layer yields only occupied cells, in a
//! deterministic z-major order.
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention: X forward, Y left,
//! Z up. Voxel `(0, 0, 0)` is centered on the origin of the map frame.
//!
//! ## Concurrency
//!
//! The map types are single-writer and never block internally. The
//! [`mapping::MappingThread`] driver owns its maps on a dedicated consumer
//! thread and receives odometry frames over a bounded channel, matching
//! the one-producer/one-consumer layout of a LOAM pipeline.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod map;
pub mod mapping;

pub use crate::core::{Point3, PointCloud3, Quaternion, Rigid3, Rigid3f, Vec3d, VoxelCoord};
pub use config::MappingConfig;
pub use error::{Result, VyomaError};
pub use grid::{DynamicGrid, FlatGrid, NestedGrid, VoxelMap};
pub use map::{CloudFilter, CloudMap, VoxelGridFilter};
pub use mapping::{
    MappingState, MappingThread, OdometryFrame, PassthroughMatcher, ScanMatcher,
    SharedMappingState,
};
