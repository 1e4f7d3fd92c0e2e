//! Sparse hierarchical voxel grid storage.
//!
//! Three layers stacked leaves-first, each storing cells of a value type
//! `V` whose `Default` is the "empty" marker skipped by iteration:
//!
//! - [`FlatGrid`]: dense 8x8x8 block in contiguous z-major order
//! - [`NestedGrid`]: 8x8x8 lazily allocated `FlatGrid` sub-blocks
//! - [`DynamicGrid`]: origin-centered block of `NestedGrid`s that doubles
//!   its extent when a write lands outside the current range
//!
//! [`VoxelMap`] closes the stack with metric semantics: a voxel edge length
//! and point-to-cell conversion.
//!
//! Memory stays proportional to occupancy: a sub-block is only allocated
//! once a cell inside it is written, and random access is constant-time at
//! every layer.

mod dynamic;
mod flat;
mod nested;
mod voxel_map;

pub use dynamic::DynamicGrid;
pub use flat::FlatGrid;
pub use nested::NestedGrid;
pub use voxel_map::VoxelMap;

use crate::core::VoxelCoord;

/// Converts an index with each component in `[0, 2^bits)` to a flat z-major
/// offset.
#[inline]
pub(crate) fn to_flat_index(index: VoxelCoord, bits: u32) -> usize {
    debug_assert!(
        index.x >= 0
            && index.y >= 0
            && index.z >= 0
            && index.x < (1 << bits)
            && index.y < (1 << bits)
            && index.z < (1 << bits),
        "local index {:?} out of range for {} bits",
        index,
        bits
    );
    ((((index.z as usize) << bits) + index.y as usize) << bits) + index.x as usize
}

/// Converts a flat z-major offset back to a 3D index with each component in
/// `[0, 2^bits)`.
#[inline]
pub(crate) fn from_flat_index(flat: usize, bits: u32) -> VoxelCoord {
    debug_assert!(flat < (1 << (3 * bits)));
    let mask = (1usize << bits) - 1;
    VoxelCoord::new(
        (flat & mask) as i32,
        ((flat >> bits) & mask) as i32,
        ((flat >> bits) >> bits) as i32,
    )
}
