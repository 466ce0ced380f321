/// The order in which a method visits the cells of a grid.
///
/// `RowMajor` reads every row left to right. `Boustrophedon` ("plow") reads
/// even rows left to right and odd rows right to left, like an ox plowing a
/// field. Flattening a grid for the skip methods uses the same two orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    RowMajor,
    Boustrophedon,
}

impl Traversal {
    /// The column visited at position `index` (0-based) of row `row`.
    ///
    /// This mapping is its own inverse: feeding a column back in yields the
    /// visiting position of that column.
    pub fn column(self, row: usize, index: usize, columns: usize) -> usize {
        match self {
            Traversal::Boustrophedon if row % 2 == 1 => columns - 1 - index,
            _ => index,
        }
    }

    /// Every cell of a `rows x columns` grid, in visiting order.
    pub fn cells(self, rows: usize, columns: usize) -> Vec<(usize, usize)> {
        (0..rows)
            .flat_map(|row| (0..columns).map(move |index| (row, self.column(row, index, columns))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_order() {
        assert_eq!(
            Traversal::RowMajor.cells(2, 3),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn boustrophedon_order() {
        assert_eq!(
            Traversal::Boustrophedon.cells(3, 2),
            vec![(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn column_mapping_is_an_involution() {
        for row in 0..4 {
            for index in 0..5 {
                let col = Traversal::Boustrophedon.column(row, index, 5);
                assert_eq!(Traversal::Boustrophedon.column(row, col, 5), index);
            }
        }
    }

    #[test]
    fn both_orders_cover_every_cell_once() {
        for traversal in [Traversal::RowMajor, Traversal::Boustrophedon] {
            let mut cells = traversal.cells(4, 7);
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), 28);
        }
    }
}
