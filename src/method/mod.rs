//! The placement methods.
//!
//! Every method knows how to verify a caller-supplied key, how to generate a
//! key of its own, and which cells a key visits when reading back. Neither
//! verification nor generation touches the matrix: both produce a [`Plan`]
//! which the caller commits only once the whole message has found a home.

mod row;
mod skip;

pub(crate) use row::RowMethod;
pub(crate) use skip::SkipMethod;

use rand::RngCore;

use crate::{error::Error, key::Key, matrix::Matrix, message::Message};

/// One cell a placement writes to (or finds already holding its letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stop {
    pub cell: (usize, usize),
    pub letter: char,
}

/// Every stop of one placement, in message order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Plan(Vec<Stop>);

impl Plan {
    fn push(&mut self, cell: (usize, usize), letter: char) {
        self.0.push(Stop { cell, letter });
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.0
    }
}

pub(crate) trait Method {
    /// Check `key` against the current locks and return where each letter goes.
    fn verify(&self, matrix: &Matrix, message: &Message, key: &Key) -> Result<Plan, Error>;

    /// Find a key of this method's shape that places `message`.
    fn generate(
        &self,
        matrix: &Matrix,
        message: &Message,
        rng: &mut dyn RngCore,
    ) -> Result<(Key, Plan), Error>;

    /// The cells `key` reads, in reading order.
    fn trail(&self, matrix: &Matrix, key: &Key) -> Result<Vec<(usize, usize)>, Error>;
}

/// A stop may land on an open cell, or on a locked one already holding `letter`.
fn check_stop(matrix: &Matrix, (row, col): (usize, usize), letter: char) -> Result<(), Error> {
    match matrix.cell_at(row, col) {
        Some(found) if matrix.is_locked(row, col) && found != letter => {
            Err(Error::EncodingConflict {
                row,
                col,
                expected: letter,
                found,
            })
        }
        Some(_) => Ok(()),
        None => Err(Error::OutOfBounds {
            row,
            col,
            rows: matrix.rows(),
            columns: matrix.columns(),
        }),
    }
}
