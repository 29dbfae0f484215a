use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer};

/// Cell coordinates as `(row, col)`, origin at the top-left
pub type Pos = (usize, usize);

/// A square matrix stored in row-major order and indexed by [`Pos`]
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Construct a `size` x `size` matrix with every cell set to `value`
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Matrix<T> {
    /// Construct a `size` x `size` matrix by calling `f` once per cell in row-major order
    pub fn from_fn(size: usize, mut f: impl FnMut(Pos) -> T) -> Self {
        let cells = (0..size * size).map(|ix| f((ix / size, ix % size))).collect();
        Self { size, cells }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.contains(pos).then(|| &self.cells[self.offset(pos)])
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.size && pos.1 < self.size
    }

    /// Iterate over the rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on a zero chunk size
        self.cells.chunks(self.size.max(1))
    }

    /// Iterate over all cells together with their position
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(ix, cell)| ((ix / size, ix % size), cell))
    }

    /// Apply `f` to every cell, producing a matrix of the same shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    fn offset(&self, pos: Pos) -> usize {
        pos.0 * self.size + pos.1
    }
}

impl Matrix<f32> {
    /// Largest absolute elementwise difference between two matrices of the same shape
    ///
    /// **Panics** if the shapes differ
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        assert_eq!(self.size, other.size, "Matrix shapes must match.");
        self.cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl<T> Index<Pos> for Matrix<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        assert!(self.contains(pos), "Position {pos:?} is out of bounds.");
        &self.cells[self.offset(pos)]
    }
}

impl<T> IndexMut<Pos> for Matrix<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        assert!(self.contains(pos), "Position {pos:?} is out of bounds.");
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

/// Serialized as nested arrays, one per row
impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}
