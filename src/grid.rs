use std::ops::{Index, IndexMut};

/// A dense 2d grid whose dimensions are fixed at construction.
///
/// Coordinates are `(row, col)`; `(0, 0)` is the top left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T> Grid<T>
where
    T: Clone,
{
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![value; rows * columns],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by calling `f` once per cell, in row-major order.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(f(row, col));
            }
        }
        Grid {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then_some((row * self.columns) + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.idx(row, col).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.idx(row, col).map(|idx| &mut self.cells[idx])
    }

    /// Iterate over the rows of this grid as slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        // `max(1)` keeps `chunks` happy for zero-width grids; there are no cells then anyway
        self.cells.chunks(self.columns.max(1)).take(self.rows)
    }

    /// Iterate over `((row, col), value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| ((idx / columns, idx % columns), value))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        let (rows, columns) = (self.rows, self.columns);
        self.get(row, col)
            .unwrap_or_else(|| panic!("({row}, {col}) out of bounds for {rows}x{columns} grid"))
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        let (rows, columns) = (self.rows, self.columns);
        self.get_mut(row, col)
            .unwrap_or_else(|| panic!("({row}, {col}) out of bounds for {rows}x{columns} grid"))
    }
}
