use crate::geometry::{GridAddress, GridDims};

/// Decides which cells are drawn in a frame.
pub trait VisibleCells {
    fn is_visible(&self, address: GridAddress) -> bool;
}

impl<F> VisibleCells for F
where
    F: Fn(GridAddress) -> bool,
{
    #[inline]
    fn is_visible(&self, address: GridAddress) -> bool {
        self(address)
    }
}

/// Every cell on the board.
#[derive(Debug, Copy, Clone, Default)]
pub struct AllCells;

impl VisibleCells for AllCells {
    #[inline]
    fn is_visible(&self, _: GridAddress) -> bool {
        true
    }
}

/// An explicit list of visible addresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedCells {
    addresses: Vec<GridAddress>,
}

impl FixedCells {
    /// Storage slots `(column, row_index)` lit by the demo board.
    pub const DEMO_SLOTS: [(u32, u32); 2] = [(0, 0), (18, 18)];

    pub fn new(addresses: impl IntoIterator<Item = GridAddress>) -> Self {
        Self {
            addresses: addresses.into_iter().collect(),
        }
    }

    /// The demo board's two lit cells, expressed as logical addresses for `dims`.
    ///
    /// Slots that do not fit in `dims` are skipped.
    pub fn demo(dims: GridDims) -> Self {
        Self::new(Self::DEMO_SLOTS.into_iter().filter_map(|(column, row_index)| {
            if column >= dims.columns() {
                return None;
            }
            Some(GridAddress::new(column, dims.flip_row(row_index)?))
        }))
    }

    pub fn addresses(&self) -> &[GridAddress] {
        &self.addresses
    }
}

impl VisibleCells for FixedCells {
    #[inline]
    fn is_visible(&self, address: GridAddress) -> bool {
        self.addresses.contains(&address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_on_reference_board() {
        let demo = FixedCells::demo(GridDims::new(20, 20).unwrap());
        assert_eq!(
            demo.addresses(),
            &[GridAddress::new(0, 19), GridAddress::new(18, 1)]
        );
    }

    #[test]
    fn demo_skips_slots_outside_small_boards() {
        let demo = FixedCells::demo(GridDims::new(5, 5).unwrap());
        assert_eq!(demo.addresses(), &[GridAddress::new(0, 4)]);
    }

    #[test]
    fn closures_are_policies() {
        let diagonal = |a: GridAddress| a.column == a.row;
        assert!(diagonal.is_visible(GridAddress::new(3, 3)));
        assert!(!diagonal.is_visible(GridAddress::new(3, 4)));
    }

    #[test]
    fn all_cells_accepts_everything() {
        assert!(AllCells.is_visible(GridAddress::new(1000, 1000)));
    }

    #[test]
    fn fixed_cells_membership() {
        let fixed = FixedCells::new([GridAddress::new(1, 2)]);
        assert!(fixed.is_visible(GridAddress::new(1, 2)));
        assert!(!fixed.is_visible(GridAddress::new(2, 1)));
    }
}
