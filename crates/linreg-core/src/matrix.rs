use crate::dtype::Float;
use crate::error::{LinregError, LinregResult};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense 2-D matrix — the fundamental data structure of the toolkit.
///
/// Stores data in a flat contiguous `Vec<T>` with row-major layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Matrix<T: Float> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Float> Matrix<T> {
    /// Create a matrix from raw row-major data.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> LinregResult<Self> {
        if data.len() != rows * cols {
            return Err(LinregError::ShapeMismatch {
                expected: vec![rows, cols],
                got: vec![data.len()],
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// Matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::ONE; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> LinregResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }
        let cols = rows[0].len();
        for row in rows {
            if row.len() != cols {
                return Err(LinregError::InvalidOperation(
                    "All rows must have the same number of columns".to_string(),
                ));
            }
        }
        let data: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(data, rows.len(), cols)
    }

    /// Reinterpret a flat sequence as a single-column matrix, one row per value.
    pub fn from_col(values: &[T]) -> Self {
        Matrix {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    /// Matrix of uniform random values in [0, 1), optionally seeded.
    pub fn rand(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let data: Vec<T> = (0..rows * cols)
            .map(|_| T::from_f64(rng.gen::<f64>()))
            .collect();
        Matrix { data, rows, cols }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, i: usize, j: usize) -> LinregResult<T> {
        if i >= self.rows {
            return Err(LinregError::IndexOutOfBounds {
                index: i,
                axis: 0,
                size: self.rows,
            });
        }
        if j >= self.cols {
            return Err(LinregError::IndexOutOfBounds {
                index: j,
                axis: 1,
                size: self.cols,
            });
        }
        Ok(self.data[i * self.cols + j])
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> LinregResult<()> {
        if i >= self.rows || j >= self.cols {
            return Err(LinregError::IndexOutOfBounds {
                index: if i >= self.rows { i } else { j },
                axis: if i >= self.rows { 0 } else { 1 },
                size: if i >= self.rows { self.rows } else { self.cols },
            });
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> LinregResult<Vec<T>> {
        if i >= self.rows {
            return Err(LinregError::IndexOutOfBounds {
                index: i,
                axis: 0,
                size: self.rows,
            });
        }
        Ok(self.data[i * self.cols..(i + 1) * self.cols].to_vec())
    }

    /// Copy of column `j`.
    pub fn col(&self, j: usize) -> LinregResult<Vec<T>> {
        if j >= self.cols {
            return Err(LinregError::IndexOutOfBounds {
                index: j,
                axis: 1,
                size: self.cols,
            });
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    // ─── Linear Algebra ─────────────────────────────────────────────────────

    /// Return a copy with a constant column of ones prepended (bias term).
    pub fn prepend_ones(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for i in 0..self.rows {
            data.push(T::ONE);
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
        }
        Matrix {
            data,
            rows: self.rows,
            cols: self.cols + 1,
        }
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Matrix<T> {
        let mut data = vec![T::ZERO; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Matrix<T>) -> LinregResult<Matrix<T>> {
        if self.cols != other.rows {
            return Err(LinregError::DimensionMismatch(format!(
                "matmul: inner dimensions must match, got {} and {}",
                self.cols, other.rows
            )));
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut data = vec![T::ZERO; m * n];
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                for j in 0..n {
                    data[i * n + j] += a * other.data[p * n + j];
                }
            }
        }
        Matrix::new(data, m, n)
    }

    /// Matrix–vector product `self * v`.
    pub fn matvec(&self, v: &[T]) -> LinregResult<Vec<T>> {
        if self.cols != v.len() {
            return Err(LinregError::DimensionMismatch(format!(
                "matvec: matrix has {} columns but vector has {} elements",
                self.cols,
                v.len()
            )));
        }
        let mut out = Vec::with_capacity(self.rows);
        for i in 0..self.rows {
            let mut sum = T::ZERO;
            for j in 0..self.cols {
                sum += self.data[i * self.cols + j] * v[j];
            }
            out.push(sum);
        }
        Ok(out)
    }
}

impl<T: Float> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T: Float> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix([")?;
        for i in 0..self.rows.min(8) {
            write!(f, "  [")?;
            for j in 0..self.cols.min(8) {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", self.data[i * self.cols + j])?;
            }
            if self.cols > 8 {
                write!(f, ", ...")?;
            }
            writeln!(f, "],")?;
        }
        if self.rows > 8 {
            writeln!(f, "  ...")?;
        }
        write!(f, "], shape=({}, {}))", self.rows, self.cols)
    }
}
