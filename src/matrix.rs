//! Dense row-major `f64` matrix used for homogeneous 2D coordinates.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix must have at least one cell");
        Self { rows,
               cols,
               values: vec![0.0; rows * cols] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn from_rows<const R: usize, const C: usize>(rows: [[f64; C]; R]) -> Self {
        let mut m = Self::new(R, C);
        for (i, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                m.set(i, j, *v);
            }
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        assert!(i < self.rows && j < self.cols,
                "index ({}, {}) out of range for ({}x{}) matrix",
                i,
                j,
                self.rows,
                self.cols);
        self.cols * i + j
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.idx(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        let k = self.idx(i, j);
        self.values[k] = v;
    }

    /// Overwrites every cell in row-major order; `values` must cover the whole matrix.
    pub fn fill(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::DimensionMismatch { op: "fill",
                                                  left: self.shape(),
                                                  right: (1, values.len()) });
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch { op: "multiply",
                                                  left: self.shape(),
                                                  right: other.shape() });
        }
        let mut res = Matrix::new(self.rows, other.cols);
        for i in 0..res.rows {
            for j in 0..res.cols {
                let sum = (0..self.cols).map(|k| self.get(i, k) * other.get(k, j)).sum();
                res.set(i, j, sum);
            }
        }
        Ok(res)
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("add", other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("subtract", other, |a, b| a - b)
    }

    fn zip_with<F>(&self, op: &'static str, other: &Matrix, f: F) -> Result<Matrix>
        where F: Fn(f64, f64) -> f64
    {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch { op,
                                                  left: self.shape(),
                                                  right: other.shape() });
        }
        Ok(Matrix { rows: self.rows,
                    cols: self.cols,
                    values: self.values.iter().zip(other.values.iter()).map(|(a, b)| f(*a, *b)).collect() })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.values[self.idx(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let k = self.idx(i, j);
        &mut self.values[k]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "{:>9.5}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
