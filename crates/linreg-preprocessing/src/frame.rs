use linreg_core::{LinregError, LinregResult, Matrix};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single table value: numeric or a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Number(f64),
    Label(String),
}

impl Cell {
    /// Total ordering used to sort a column's value domain: numbers first
    /// (by value), then labels (lexicographically). NaN sorts last among
    /// numbers.
    pub fn domain_cmp(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                })
            }
            (Cell::Number(_), Cell::Label(_)) => Ordering::Less,
            (Cell::Label(_), Cell::Number(_)) => Ordering::Greater,
            (Cell::Label(a), Cell::Label(b)) => a.cmp(b),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Label(s.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Label(s) => write!(f, "{}", s),
        }
    }
}

/// A rectangular table of [`Cell`] values, row-major.
///
/// Unlike [`Matrix`], a frame may hold text labels, making it the input type
/// for categorical encoding. Once fully numeric it converts to a matrix via
/// [`Frame::to_matrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Frame {
    /// Build a frame from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<Cell>]) -> LinregResult<Self> {
        if rows.is_empty() {
            return Ok(Frame {
                cells: Vec::new(),
                rows: 0,
                cols: 0,
            });
        }
        let cols = rows[0].len();
        for row in rows {
            if row.len() != cols {
                return Err(LinregError::InvalidOperation(
                    "All rows must have the same number of columns".to_string(),
                ));
            }
        }
        let cells: Vec<Cell> = rows.iter().flat_map(|r| r.iter().cloned()).collect();
        Ok(Frame {
            cells,
            rows: rows.len(),
            cols,
        })
    }

    /// Build a frame from per-column cell vectors. All columns must have the
    /// same length.
    pub fn from_columns(columns: &[Vec<Cell>]) -> LinregResult<Self> {
        if columns.is_empty() {
            return Ok(Frame {
                cells: Vec::new(),
                rows: 0,
                cols: 0,
            });
        }
        let rows = columns[0].len();
        for col in columns {
            if col.len() != rows {
                return Err(LinregError::InvalidOperation(
                    "All columns must have the same number of rows".to_string(),
                ));
            }
        }
        let mut cells = Vec::with_capacity(rows * columns.len());
        for i in 0..rows {
            for col in columns {
                cells.push(col[i].clone());
            }
        }
        Ok(Frame {
            cells,
            rows,
            cols: columns.len(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> LinregResult<&Cell> {
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
        Ok(&self.cells[i * self.cols + j])
    }

    /// Decompose into per-column cell vectors.
    pub fn to_columns(&self) -> Vec<Vec<Cell>> {
        (0..self.cols)
            .map(|j| {
                (0..self.rows)
                    .map(|i| self.cells[i * self.cols + j].clone())
                    .collect()
            })
            .collect()
    }

    /// Convert a fully numeric frame into a design matrix.
    ///
    /// Fails if any cell still holds a text label — encode categorical
    /// columns first.
    pub fn to_matrix(&self) -> LinregResult<Matrix<f64>> {
        let mut data = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            match cell {
                Cell::Number(v) => data.push(*v),
                Cell::Label(s) => {
                    return Err(LinregError::InvalidOperation(format!(
                        "to_matrix: column still holds label {:?}; one-hot encode it first",
                        s
                    )))
                }
            }
        }
        Matrix::new(data, self.rows, self.cols)
    }
}
