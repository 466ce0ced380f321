//! Text views of a matrix for debugging placements.

use std::collections::HashSet;

use crate::{encoder::Encoder, error::Error, grid::Grid, key::Key, matrix::Matrix};

fn render(grid: &Grid<char>) -> String {
    grid.row_slices()
        .map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `X` for every locked cell, `O` for every open one.
pub fn locks(matrix: &Matrix) -> String {
    let grid = Grid::from_fn(matrix.rows(), matrix.columns(), |row, col| {
        if matrix.is_locked(row, col) {
            'X'
        } else {
            'O'
        }
    });
    render(&grid)
}

/// The letters `key` reads under `encoder`, with `-` in every other cell.
pub fn trail(matrix: &Matrix, encoder: &Encoder, key: &Key) -> Result<String, Error> {
    let visited: HashSet<(usize, usize)> = encoder.trail(matrix, key)?.into_iter().collect();
    let grid = Grid::from_fn(matrix.rows(), matrix.columns(), |row, col| {
        match matrix.cell_at(row, col) {
            Some(letter) if visited.contains(&(row, col)) => letter,
            _ => '-',
        }
    });
    Ok(render(&grid))
}
