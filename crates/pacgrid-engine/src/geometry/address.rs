use std::fmt;

use anyhow::Result;

/// Logical cell coordinate on the board.
///
/// `row` counts upward: row 0 is the bottom visual row.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridAddress {
    pub column: u32,
    pub row: u32,
}

impl GridAddress {
    #[inline]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Board dimensions in cells. Both axes are at least 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridDims {
    columns: u32,
    rows: u32,
}

impl GridDims {
    pub fn new(columns: u32, rows: u32) -> Result<Self> {
        anyhow::ensure!(
            columns > 0 && rows > 0,
            "grid must be at least 1x1 cells (got {columns}x{rows})"
        );
        Ok(Self { columns, rows })
    }

    #[inline]
    pub const fn columns(self) -> u32 {
        self.columns
    }

    #[inline]
    pub const fn rows(self) -> u32 {
        self.rows
    }

    #[inline]
    pub const fn cell_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    #[inline]
    pub const fn contains(self, address: GridAddress) -> bool {
        address.column < self.columns && address.row < self.rows
    }

    /// Maps a storage row index (counted from the top) to a logical row (counted from the bottom).
    ///
    /// The mapping is its own inverse. Returns `None` when `row_index` is out of range.
    #[inline]
    pub fn flip_row(self, row_index: u32) -> Option<u32> {
        self.rows.checked_sub(row_index)?.checked_sub(1)
    }

    /// Flat storage position of `(column, row_index)`: column-major, rows from the top.
    #[inline]
    pub fn storage_index(self, column: u32, row_index: u32) -> Option<usize> {
        if column >= self.columns || row_index >= self.rows {
            return None;
        }
        Some(column as usize * self.rows as usize + row_index as usize)
    }

    /// Flat storage position of a logical address.
    #[inline]
    pub fn slot_of(self, address: GridAddress) -> Option<usize> {
        let row_index = self.flip_row(address.row)?;
        self.storage_index(address.column, row_index)
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}
