use rand::{seq::SliceRandom, RngCore};
use tracing::trace;

use super::{check_stop, Method, Plan};
use crate::{error::Error, key::Key, matrix::Matrix, message::Message, traversal::Traversal};

/// The grid is flattened into one line of cells and a cursor walks it: before
/// each letter the cursor passes over `skip` cells and lands on the next one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SkipMethod {
    traversal: Traversal,
    max_skip: usize,
}

/// Where the cursor lands after skipping `skip` cells. The cursor starts
/// just before the first cell.
fn advance(position: Option<usize>, skip: usize) -> Option<usize> {
    match position {
        None => Some(skip),
        Some(position) => position.checked_add(skip)?.checked_add(1),
    }
}

impl SkipMethod {
    /// `max_skip` is the width of the window searched for each letter when
    /// generating a key; generated skips are always below it.
    pub fn new(traversal: Traversal, max_skip: usize) -> Self {
        SkipMethod {
            traversal,
            max_skip,
        }
    }

    fn flatten(&self, matrix: &Matrix) -> Vec<(usize, usize)> {
        self.traversal.cells(matrix.rows(), matrix.columns())
    }
}

impl Method for SkipMethod {
    fn verify(&self, matrix: &Matrix, message: &Message, key: &Key) -> Result<Plan, Error> {
        let line = self.flatten(matrix);
        let total = message.len();
        let mut plan = Plan::default();
        let mut position = None;

        for (step, &letter) in message.letters().iter().enumerate() {
            let next = advance(position, key.at(step))
                .filter(|next| *next < line.len())
                .ok_or(Error::InsufficientSpace {
                    placed: step,
                    total,
                })?;
            check_stop(matrix, line[next], letter)?;
            plan.push(line[next], letter);
            position = Some(next);
        }
        Ok(plan)
    }

    fn generate(
        &self,
        matrix: &Matrix,
        message: &Message,
        rng: &mut dyn RngCore,
    ) -> Result<(Key, Plan), Error> {
        let line = self.flatten(matrix);
        let total = message.len();
        let mut entries = Vec::with_capacity(total);
        let mut plan = Plan::default();
        let mut start = 0;

        for (step, &letter) in message.letters().iter().enumerate() {
            let window: Vec<(usize, (usize, usize))> = (0..self.max_skip)
                .map_while(|skip| line.get(start + skip).map(|&cell| (skip, cell)))
                .collect();

            // a cell already showing the letter costs no overwrite
            let natural = window
                .iter()
                .find(|(_, (row, col))| matrix.cell_at(*row, *col) == Some(letter));
            let picked = match natural {
                Some(hit) => {
                    trace!(step, skip = hit.0, %letter, "natural hit");
                    Some(hit)
                }
                None => {
                    let open: Vec<_> = window
                        .iter()
                        .filter(|(_, (row, col))| !matrix.is_locked(*row, *col))
                        .collect();
                    open.choose(rng).copied()
                }
            };
            let &(skip, cell) = picked.ok_or(Error::InsufficientSpace {
                placed: step,
                total,
            })?;

            entries.push(skip);
            plan.push(cell, letter);
            start += skip + 1;
        }

        Ok((Key::new(entries)?, plan))
    }

    /// Reading stops, without error, once the cursor walks off the grid.
    fn trail(&self, matrix: &Matrix, key: &Key) -> Result<Vec<(usize, usize)>, Error> {
        let line = self.flatten(matrix);
        let mut trail = Vec::new();
        let mut position = None;
        while let Some(next) = advance(position, key.at(trail.len())).filter(|n| *n < line.len())
        {
            trail.push(line[next]);
            position = Some(next);
        }
        Ok(trail)
    }
}
