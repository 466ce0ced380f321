use rand::{seq::SliceRandom, RngCore};
use tracing::trace;

use super::{check_stop, Method, Plan};
use crate::{error::Error, key::Key, matrix::Matrix, message::Message, traversal::Traversal};

/// One key entry per row: `0` skips the row, `v` takes the `v`-th column in
/// the row's reading direction.
///
/// The key is cycled across the rows, and a message has to fit in a single
/// pass over them since that is all a reader walks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowMethod {
    traversal: Traversal,
}

impl RowMethod {
    pub fn new(traversal: Traversal) -> Self {
        RowMethod { traversal }
    }

    /// Resolve the 1-based entry `entry` on row `row` to a column.
    fn column(&self, matrix: &Matrix, row: usize, entry: usize) -> Result<usize, Error> {
        let columns = matrix.columns();
        if entry > columns {
            return Err(Error::InvalidKey(format!(
                "column {entry} is beyond the grid width of {columns}"
            )));
        }
        Ok(self.traversal.column(row, entry - 1, columns))
    }
}

impl Method for RowMethod {
    fn verify(&self, matrix: &Matrix, message: &Message, key: &Key) -> Result<Plan, Error> {
        let letters = message.letters();
        let mut plan = Plan::default();
        for row in 0..matrix.rows() {
            let Some(&letter) = letters.get(plan.len()) else {
                break;
            };
            let entry = key.at(row);
            if entry == 0 {
                continue;
            }
            let col = self.column(matrix, row, entry)?;
            check_stop(matrix, (row, col), letter)?;
            plan.push((row, col), letter);
        }

        if plan.len() < letters.len() {
            return Err(Error::InsufficientSpace {
                placed: plan.len(),
                total: letters.len(),
            });
        }
        Ok(plan)
    }

    fn generate(
        &self,
        matrix: &Matrix,
        message: &Message,
        rng: &mut dyn RngCore,
    ) -> Result<(Key, Plan), Error> {
        let total = message.len();
        let columns = matrix.columns();
        let mut entries = Vec::with_capacity(total);
        let mut plan = Plan::default();

        for (row, &letter) in message.letters().iter().enumerate() {
            let no_space = Error::InsufficientSpace { placed: row, total };
            if row >= matrix.rows() {
                return Err(no_space);
            }
            let open: Vec<usize> = (0..columns)
                .filter(|&col| !matrix.is_locked(row, col))
                .collect();
            let &col = open.choose(rng).ok_or(no_space)?;
            trace!(row, col, %letter, open = open.len(), "row placement");

            entries.push(self.traversal.column(row, col, columns) + 1);
            plan.push((row, col), letter);
        }

        Ok((Key::new(entries)?, plan))
    }

    fn trail(&self, matrix: &Matrix, key: &Key) -> Result<Vec<(usize, usize)>, Error> {
        (0..matrix.rows())
            .filter(|&row| key.at(row) != 0)
            .map(|row| Ok((row, self.column(matrix, row, key.at(row))?)))
            .collect()
    }
}
