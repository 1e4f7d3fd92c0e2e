//! Dense innermost grid block.

use super::{from_flat_index, to_flat_index};
use crate::core::VoxelCoord;

/// Cells per dimension as a power of two.
const BITS: u32 = 3;

/// Total cell count of one block.
const CELL_COUNT: usize = 1 << (3 * BITS);

/// A dense 8x8x8 block of cells stored contiguously in z-major order.
///
/// All cells are eagerly default-initialized and the block never grows.
/// Local indices run from 0 to 7 per dimension.
#[derive(Debug)]
pub struct FlatGrid<V> {
    cells: Vec<V>,
}

impl<V: Default + PartialEq> FlatGrid<V> {
    /// Cells per dimension.
    pub const EXTENT: i32 = 1 << BITS;

    /// Create a block with every cell default-valued.
    pub fn new() -> Self {
        Self {
            cells: std::iter::repeat_with(V::default).take(CELL_COUNT).collect(),
        }
    }

    /// Value stored at `index`; each component must be in `[0, 8)`.
    #[inline]
    pub fn get(&self, index: VoxelCoord) -> &V {
        &self.cells[to_flat_index(index, BITS)]
    }

    /// Mutable access to the cell at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: VoxelCoord) -> &mut V {
        &mut self.cells[to_flat_index(index, BITS)]
    }

    /// Iterate over all cells whose value differs from the default, in
    /// ascending flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &V)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != V::default())
            .map(|(flat, value)| (from_flat_index(flat, BITS), value))
    }
}

impl<V: Default + PartialEq> Default for FlatGrid<V> {
    fn default() -> Self {
        Self::new()
    }
}
