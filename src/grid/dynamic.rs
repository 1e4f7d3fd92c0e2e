//! Outer grid layer: origin-centered, growing on demand.

use super::nested::NestedGrid;
use super::{from_flat_index, to_flat_index};
use crate::core::VoxelCoord;

/// Meta cells per dimension as a power of two at construction.
const INITIAL_BITS: u32 = 1;

/// Hard cap on the meta-cell bit width. Together with the sub-grid extent
/// this bounds voxel coordinates to ±8192 per axis.
const MAX_BITS: u32 = 8;

/// A growing arrangement of [`NestedGrid`] meta cells centered on the
/// origin, so signed indices are addressable in `[-extent/2, extent/2)`.
///
/// Reads outside the current extent report the cell as default without any
/// side effect. Writes outside the current extent double the extent (in
/// every dimension, symmetrically around the origin) until the index fits,
/// re-placing existing meta cells so that the signed coordinate of every
/// stored value is preserved.
#[derive(Debug)]
pub struct DynamicGrid<V> {
    bits: u32,
    meta_cells: Vec<Option<Box<NestedGrid<V>>>>,
}

impl<V: Default + PartialEq> DynamicGrid<V> {
    /// Create a grid spanning `[-64, 64)` cells per axis (2x2x2 meta cells,
    /// none allocated).
    pub fn new() -> Self {
        Self {
            bits: INITIAL_BITS,
            meta_cells: std::iter::repeat_with(|| None)
                .take(1 << (3 * INITIAL_BITS))
                .collect(),
        }
    }

    /// Current cells per dimension.
    #[inline]
    pub fn extent(&self) -> i32 {
        NestedGrid::<V>::EXTENT << self.bits
    }

    /// Value stored at the signed `index`, or `None` if the cell is outside
    /// the current extent or has never been written.
    pub fn get(&self, index: VoxelCoord) -> Option<&V> {
        let shifted = index + VoxelCoord::splat(self.extent() >> 1);
        if !self.contains_shifted(shifted) {
            return None;
        }
        let meta = shifted.div_floor_nonneg(NestedGrid::<V>::EXTENT);
        let cell = self.meta_cells[to_flat_index(meta, self.bits)].as_ref()?;
        cell.get(shifted - meta * NestedGrid::<V>::EXTENT)
    }

    /// Mutable access to the cell at the signed `index`, growing the grid
    /// and allocating meta cells as needed.
    ///
    /// # Panics
    ///
    /// Panics if `index` cannot be covered even at the maximum extent
    /// (any component beyond ±8192).
    pub fn get_mut(&mut self, index: VoxelCoord) -> &mut V {
        while !self.contains_shifted(index + VoxelCoord::splat(self.extent() >> 1)) {
            self.grow();
        }
        let shifted = index + VoxelCoord::splat(self.extent() >> 1);
        let meta = shifted.div_floor_nonneg(NestedGrid::<V>::EXTENT);
        let flat = to_flat_index(meta, self.bits);
        let cell = self.meta_cells[flat].get_or_insert_with(Box::default);
        cell.get_mut(shifted - meta * NestedGrid::<V>::EXTENT)
    }

    /// Iterate over all non-default cells in z-major order per layer,
    /// yielding signed voxel coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &V)> + '_ {
        let half = VoxelCoord::splat(self.extent() >> 1);
        let bits = self.bits;
        self.meta_cells
            .iter()
            .enumerate()
            .filter_map(|(flat, slot)| slot.as_ref().map(|cell| (flat, cell)))
            .flat_map(move |(flat, cell)| {
                let base = from_flat_index(flat, bits) * NestedGrid::<V>::EXTENT;
                cell.iter()
                    .map(move |(inner, value)| (base + inner - half, value))
            })
    }

    #[inline]
    fn contains_shifted(&self, shifted: VoxelCoord) -> bool {
        let extent = self.extent();
        shifted.x >= 0
            && shifted.y >= 0
            && shifted.z >= 0
            && shifted.x < extent
            && shifted.y < extent
            && shifted.z < extent
    }

    /// Double the extent in each dimension, re-centering existing meta
    /// cells so signed coordinates are preserved.
    fn grow(&mut self) {
        let new_bits = self.bits + 1;
        assert!(
            new_bits <= MAX_BITS,
            "grid cannot grow beyond {} cells per axis",
            NestedGrid::<V>::EXTENT << MAX_BITS
        );
        let mut new_cells: Vec<Option<Box<NestedGrid<V>>>> =
            std::iter::repeat_with(|| None).take(1 << (3 * new_bits)).collect();
        let offset = VoxelCoord::splat(1 << (self.bits - 1));
        for flat in 0..self.meta_cells.len() {
            if let Some(cell) = self.meta_cells[flat].take() {
                let new_meta = from_flat_index(flat, self.bits) + offset;
                new_cells[to_flat_index(new_meta, new_bits)] = Some(cell);
            }
        }
        self.meta_cells = new_cells;
        self.bits = new_bits;
    }
}

impl<V: Default + PartialEq> Default for DynamicGrid<V> {
    fn default() -> Self {
        Self::new()
    }
}
