//! Flat row-major grid shared by tiles, surface labels, and region labels.

use serde::{Deserialize, Serialize};

use crate::types::Cell;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self { rows, cols, values: vec![value; rows * cols] }
    }

    pub fn from_fn(rows: usize, cols: usize, mut init: impl FnMut(Cell) -> T) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(init(Cell { row, col }));
            }
        }
        Self { rows, cols, values }
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(rows.iter().all(|row| row.len() == cols), "matrix rows must share one width");
        Self { rows: rows.len(), cols, values: rows.concat() }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn has(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn get(&self, cell: Cell) -> T {
        self.values[self.index(cell)]
    }

    pub fn checked_get(&self, cell: Cell) -> Option<T> {
        self.has(cell).then(|| self.values[cell.row * self.cols + cell.col])
    }

    pub fn set(&mut self, cell: Cell, value: T) {
        let index = self.index(cell);
        self.values[index] = value;
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, T)> + '_ {
        let cols = self.cols;
        self.values
            .iter()
            .enumerate()
            .map(move |(index, &value)| (Cell { row: index / cols, col: index % cols }, value))
    }

    /// Rewrites every `from` value to `to`, returning how many cells changed.
    pub fn replace(&mut self, from: T, to: T) -> usize
    where
        T: PartialEq,
    {
        let mut replaced = 0;
        for value in self.values.iter_mut().filter(|value| **value == from) {
            *value = to;
            replaced += 1;
        }
        replaced
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(
            self.has(cell),
            "index out of range: ({}, {}) in {}x{} matrix",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
        cell.row * self.cols + cell.col
    }
}
