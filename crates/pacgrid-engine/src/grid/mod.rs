//! Board grid: one placed, GPU-backed cell per address.
//!
//! Responsibilities:
//! - compile each address into device-space geometry and hand it to a `CellUploader`
//! - build the whole board up front, all-or-nothing
//! - own every cell's drawable so the board releases its GPU memory in one place
//!
//! Storage is `[column][row_index]` flattened column-major, with `row_index`
//! counted from the top. Logical rows count from the bottom.

mod builder;
mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{build_grid, compile_cell, CellUploader};
pub use visibility::{AllCells, FixedCells, VisibleCells};

use crate::geometry::{DeviceRect, GridAddress, GridDims};

/// A cell whose geometry has been placed and uploaded.
#[derive(Debug)]
pub struct PlacedCell<D> {
    pub address: GridAddress,
    /// Device-space bounds of the uploaded quad.
    pub rect: DeviceRect,
    pub drawable: D,
}

/// Fully populated board. Never resized after construction.
#[derive(Debug)]
pub struct Grid<D> {
    dims: GridDims,
    cells: Vec<PlacedCell<D>>,
}

impl<D> Grid<D> {
    pub(crate) fn from_cells(dims: GridDims, cells: Vec<PlacedCell<D>>) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self { dims, cells }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in storage order (column-major, top row first).
    #[inline]
    pub fn cells(&self) -> &[PlacedCell<D>] {
        &self.cells
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedCell<D>> {
        self.cells.iter()
    }

    /// Cell at storage position `(column, row_index)`.
    #[inline]
    pub fn slot(&self, column: u32, row_index: u32) -> Option<&PlacedCell<D>> {
        self.cells.get(self.dims.storage_index(column, row_index)?)
    }

    /// Cell at logical address `address`.
    #[inline]
    pub fn get(&self, address: GridAddress) -> Option<&PlacedCell<D>> {
        self.cells.get(self.dims.slot_of(address)?)
    }
}

impl<D> Drop for Grid<D> {
    fn drop(&mut self) {
        if !self.cells.is_empty() {
            log::debug!("releasing {} grid cells ({})", self.cells.len(), self.dims);
        }
    }
}

impl<'a, D> IntoIterator for &'a Grid<D> {
    type Item = &'a PlacedCell<D>;
    type IntoIter = std::slice::Iter<'a, PlacedCell<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
