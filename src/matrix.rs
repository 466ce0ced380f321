use std::{collections::BTreeSet, fmt, str::FromStr};

use rand::Rng;

use crate::{
    algorithm::Algorithm, alphabet::Alphabet, encoder::Encoder, error::Error, grid::Grid,
    key::Key, method::Plan,
};

/// The letter grid messages are hidden in.
///
/// Alongside the letters, the matrix tracks which cells are locked: committed
/// to a character by some earlier placement. A locked cell never changes its
/// letter again and never becomes unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    letters: Grid<char>,
    locked: Grid<bool>,
}

impl Matrix {
    /// A fresh matrix with every cell drawn independently from `alphabet`.
    pub fn random<R: Rng + ?Sized>(
        columns: usize,
        rows: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Self {
        let letters = Grid::from_fn(rows, columns, |_, _| alphabet.sample(rng));
        Matrix {
            letters,
            locked: Grid::filled(rows, columns, false),
        }
    }

    /// A matrix with the given rows of letters and nothing locked.
    pub fn from_rows<Rows, Row>(rows: Rows) -> Result<Self, Error>
    where
        Rows: IntoIterator<Item = Row>,
        Row: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != columns) {
            return Err(Error::MalformedGrid(format!(
                "row {bad} has {} cells, expected {columns}",
                rows[bad].len()
            )));
        }
        let letters = Grid::from_fn(rows.len(), columns, |row, col| rows[row][col]);
        Ok(Matrix {
            locked: Grid::filled(letters.rows(), columns, false),
            letters,
        })
    }

    pub fn rows(&self) -> usize {
        self.letters.rows()
    }

    pub fn columns(&self) -> usize {
        self.letters.columns()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), Error> {
        if row < self.rows() && col < self.columns() {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                columns: self.columns(),
            })
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<char> {
        self.letters.get(row, col).copied()
    }

    /// Overwrite a cell. This is the only way letters change after creation,
    /// and only placement commits call it.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, letter: char) -> Result<(), Error> {
        self.check_bounds(row, col)?;
        debug_assert!(
            !self.locked[(row, col)] || self.letters[(row, col)] == letter,
            "locked cell must not change"
        );
        self.letters[(row, col)] = letter;
        Ok(())
    }

    /// Out-of-bounds cells are never locked.
    pub fn is_locked(&self, row: usize, col: usize) -> bool {
        self.locked.get(row, col).copied().unwrap_or(false)
    }

    /// Commit a cell to its current letter. Locking is permanent.
    pub fn lock(&mut self, row: usize, col: usize) -> Result<(), Error> {
        self.check_bounds(row, col)?;
        self.locked[(row, col)] = true;
        Ok(())
    }

    /// All locked coordinates as `(row, col)`.
    pub fn locked_cells(&self) -> BTreeSet<(usize, usize)> {
        self.locked
            .iter()
            .filter(|(_, locked)| **locked)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// A copy of the letters, one `Vec` per row.
    pub fn raw(&self) -> Vec<Vec<char>> {
        self.letters.row_slices().map(<[char]>::to_vec).collect()
    }

    /// Write and lock every stop of a verified plan.
    ///
    /// Plans are built against the current state without touching it, so
    /// every stop is in bounds and either unlocked or already holding its
    /// letter.
    pub(crate) fn commit(&mut self, plan: &Plan) -> Result<(), Error> {
        for stop in plan.stops() {
            let (row, col) = stop.cell;
            if self.is_locked(row, col) {
                continue;
            }
            self.set_cell(row, col, stop.letter)?;
            self.lock(row, col)?;
        }
        Ok(())
    }

    /// Place `message` with `algorithm`, returning the key that reads it back.
    ///
    /// With a preset key, the key is verified against the locks first and
    /// returned unchanged; otherwise a key is generated. Skip methods use the
    /// default search window; see [`Encoder`] to change it.
    pub fn add_message<R: Rng>(
        &mut self,
        algorithm: Algorithm,
        message: &str,
        preset: Option<&Key>,
        rng: &mut R,
    ) -> Result<Key, Error> {
        Encoder::new(algorithm).encode(self, message, preset, rng)
    }

    /// `true` when `key` could place `message` without disturbing any lock.
    pub fn can_encode(&self, algorithm: Algorithm, message: &str, key: &Key) -> bool {
        Encoder::new(algorithm).can_encode(self, message, key)
    }

    pub fn decode(&self, algorithm: Algorithm, key: &Key) -> Result<String, Error> {
        Encoder::new(algorithm).decode(self, key)
    }
}

/// Each row's letters joined by single spaces, rows joined by newlines.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.letters.row_slices().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (col, letter) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// Parses the text form produced by `Display`. Nothing is locked afterwards.
impl FromStr for Matrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| {
                        let mut chars = token.chars();
                        match (chars.next(), chars.next()) {
                            (Some(letter), None) => Ok(letter),
                            _ => Err(Error::MalformedGrid(format!(
                                "\"{token}\" is not a single character"
                            ))),
                        }
                    })
                    .collect::<Result<String, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Matrix::from_rows(rows)
    }
}
