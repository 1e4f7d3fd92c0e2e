//! Fundamental types: points, voxel coordinates, clouds, rigid transforms.

mod cloud;
mod point;
mod transform;

pub use cloud::PointCloud3;
pub use point::{Point3, VoxelCoord};
pub use transform::{Quaternion, Quaternionf, Rigid3, Rigid3f, Vec3d};
