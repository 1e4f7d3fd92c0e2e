//! Middle grid layer with lazily allocated sub-blocks.

use super::flat::FlatGrid;
use super::{from_flat_index, to_flat_index};
use crate::core::VoxelCoord;

/// Meta cells per dimension as a power of two.
const BITS: u32 = 3;

/// Total meta-cell count.
const META_CELL_COUNT: usize = 1 << (3 * BITS);

/// An 8x8x8 arrangement of [`FlatGrid`] sub-blocks.
///
/// Sub-blocks are allocated on the first mutable access into their range;
/// a read through an unallocated slot costs nothing and reports the cell as
/// default. Local indices run from 0 to 63 per dimension.
#[derive(Debug)]
pub struct NestedGrid<V> {
    meta_cells: Vec<Option<Box<FlatGrid<V>>>>,
}

impl<V: Default + PartialEq> NestedGrid<V> {
    /// Cells per dimension.
    pub const EXTENT: i32 = FlatGrid::<V>::EXTENT << BITS;

    /// Create a grid with no sub-blocks allocated.
    pub fn new() -> Self {
        Self {
            meta_cells: std::iter::repeat_with(|| None).take(META_CELL_COUNT).collect(),
        }
    }

    /// Value stored at `index`, or `None` if the cell has never been
    /// written (its sub-block does not exist).
    pub fn get(&self, index: VoxelCoord) -> Option<&V> {
        let meta = Self::meta_index(index);
        let cell = self.meta_cells[to_flat_index(meta, BITS)].as_ref()?;
        Some(cell.get(index - meta * FlatGrid::<V>::EXTENT))
    }

    /// Mutable access to the cell at `index`, allocating its sub-block if
    /// necessary. The reference stays valid until this grid is dropped.
    pub fn get_mut(&mut self, index: VoxelCoord) -> &mut V {
        let meta = Self::meta_index(index);
        let flat = to_flat_index(meta, BITS);
        let cell = self.meta_cells[flat].get_or_insert_with(Box::default);
        cell.get_mut(index - meta * FlatGrid::<V>::EXTENT)
    }

    /// Iterate over all non-default cells, composing the z-major meta
    /// traversal with each sub-block's iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &V)> + '_ {
        self.meta_cells
            .iter()
            .enumerate()
            .filter_map(|(flat, slot)| slot.as_ref().map(|cell| (flat, cell)))
            .flat_map(|(flat, cell)| {
                let base = from_flat_index(flat, BITS) * FlatGrid::<V>::EXTENT;
                cell.iter().map(move |(inner, value)| (base + inner, value))
            })
    }

    /// Meta index of the sub-block containing `index`.
    #[inline]
    fn meta_index(index: VoxelCoord) -> VoxelCoord {
        let meta = index.div_floor_nonneg(FlatGrid::<V>::EXTENT);
        debug_assert!(
            meta.x < (1 << BITS) && meta.y < (1 << BITS) && meta.z < (1 << BITS),
            "index {:?} out of range",
            index
        );
        meta
    }
}

impl<V: Default + PartialEq> Default for NestedGrid<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_cells_read_as_absent() {
        let grid: NestedGrid<i32> = NestedGrid::new();
        assert_eq!(grid.get(VoxelCoord::new(0, 0, 0)), None);
        assert_eq!(grid.get(VoxelCoord::new(63, 63, 63)), None);
    }

    #[test]
    fn test_write_allocates_only_one_sub_block() {
        let mut grid: NestedGrid<i32> = NestedGrid::new();
        *grid.get_mut(VoxelCoord::new(9, 0, 0)) = 5;

        // Same sub-block: present (default-valued). Different sub-block:
        // still unallocated.
        assert_eq!(grid.get(VoxelCoord::new(9, 0, 0)), Some(&5));
        assert_eq!(grid.get(VoxelCoord::new(8, 1, 2)), Some(&0));
        assert_eq!(grid.get(VoxelCoord::new(16, 0, 0)), None);
    }

    #[test]
    fn test_iter_yields_grid_local_coordinates() {
        let mut grid: NestedGrid<i32> = NestedGrid::new();
        *grid.get_mut(VoxelCoord::new(9, 0, 0)) = 1;
        *grid.get_mut(VoxelCoord::new(0, 10, 62)) = 2;

        let cells: Vec<(VoxelCoord, i32)> = grid.iter().map(|(c, v)| (c, *v)).collect();

        assert_eq!(
            cells,
            vec![
                (VoxelCoord::new(9, 0, 0), 1),
                (VoxelCoord::new(0, 10, 62), 2),
            ]
        );
    }

    #[test]
    fn test_iter_order_follows_meta_then_inner() {
        let mut grid: NestedGrid<i32> = NestedGrid::new();
        // Two cells in the same sub-block plus one in a later meta cell.
        *grid.get_mut(VoxelCoord::new(1, 1, 0)) = 2;
        *grid.get_mut(VoxelCoord::new(7, 0, 0)) = 1;
        *grid.get_mut(VoxelCoord::new(8, 0, 0)) = 3;

        let order: Vec<i32> = grid.iter().map(|(_, v)| *v).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }
}
