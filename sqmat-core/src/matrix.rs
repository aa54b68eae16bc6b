use crate::cell::Cell;
use crate::error::{Result, SqmatError};
use crate::traits::{require_initialized, Shape, SumOrd};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense `N x N` matrix stored as `N` owned row vectors of length `N`.
///
/// Arithmetic is delegated row-wise to [`Vector`], so initialization errors
/// surface exactly as the vector operation reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vector>", into = "Vec<Vector>")]
pub struct SquareMatrix {
    rows: Vec<Vector>,
}

impl SquareMatrix {
    /// Creates an `size x size` matrix with every cell unset.
    ///
    /// # Errors
    /// Returns [`SqmatError::InvalidSize`] when `size` is negative.
    pub fn new(size: isize) -> Result<Self> {
        let n = usize::try_from(size).map_err(|_| SqmatError::InvalidSize(size))?;
        log::debug!("Creating {}x{} matrix", n, n);
        Ok(Self::with_size(n))
    }

    fn with_size(n: usize) -> Self {
        Self {
            rows: (0..n).map(|_| Vector::with_len(n)).collect(),
        }
    }

    /// Builds a fully initialized matrix from row-major data.
    ///
    /// # Errors
    /// Returns [`SqmatError::LogicError`] when the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        rows.into_iter()
            .map(Vector::from)
            .collect::<Vec<_>>()
            .try_into()
    }

    /// Identity matrix: 1.0 on the diagonal, 0.0 elsewhere, every cell written.
    pub fn identity(size: usize) -> Self {
        log::debug!("Creating {}x{} identity matrix", size, size);
        let rows = (0..size)
            .map(|i| {
                Vector::from_cells(
                    (0..size)
                        .map(|j| Cell::new(if i == j { 1.0 } else { 0.0 }))
                        .collect(),
                )
            })
            .collect();
        Self { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    fn checked_row(&self, row: isize) -> Result<usize> {
        usize::try_from(row)
            .ok()
            .filter(|&r| r < self.size())
            .ok_or(SqmatError::RowIndexOutOfBounds {
                row,
                size: self.size(),
            })
    }

    pub fn row(&self, row: isize) -> Result<&Vector> {
        log::debug!("Reading row {}", row);
        let r = self.checked_row(row)?;
        Ok(&self.rows[r])
    }

    pub fn row_mut(&mut self, row: isize) -> Result<&mut Vector> {
        log::debug!("Writing row {}", row);
        let r = self.checked_row(row)?;
        Ok(&mut self.rows[r])
    }

    /// Reads a cell that must have been written.
    pub fn value(&self, row: isize, col: isize) -> Result<f64> {
        self.row(row)?.value(col)
    }

    pub fn set(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        self.row_mut(row)?.set(col, value)
    }

    pub fn all_initialized(&self) -> bool {
        self.rows.iter().all(Vector::all_initialized)
    }

    /// Sum of every cell.
    pub fn sum(&self) -> Result<f64> {
        log::debug!("Summing {}x{} matrix", self.size(), self.size());
        self.rows.iter().map(Vector::sum).sum()
    }

    fn ensure_same_size(&self, other: &SquareMatrix, op: &str) -> Result<()> {
        if self.size() != other.size() {
            return Err(SqmatError::logic(format!(
                "Matrix sizes must match for {op} ({} != {})",
                self.size(),
                other.size()
            )));
        }
        Ok(())
    }

    fn ensure_initialized(&self, msg: &str) -> Result<()> {
        require_initialized(self, msg)
    }

    /// Rows replaced through [`SquareMatrix::row_mut`] may have the wrong length.
    fn ensure_square(&self) -> Result<()> {
        let n = self.size();
        if let Some(bad) = self.rows.iter().position(|row| row.len() != n) {
            return Err(SqmatError::logic(format!(
                "Matrix is not square: row {bad} has length {} but the matrix has {n} rows",
                self.rows[bad].len()
            )));
        }
        Ok(())
    }

    /// Builds a new matrix from `f` applied to every row.
    fn map_rows<F>(&self, f: F) -> Result<SquareMatrix>
    where
        F: Fn(&Vector) -> Result<Vector>,
    {
        let rows = self.rows.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Builds a new matrix from `f` applied to every pair of matching rows.
    fn zip_rows<F>(&self, other: &SquareMatrix, op: &str, f: F) -> Result<SquareMatrix>
    where
        F: Fn(&Vector, &Vector) -> Result<Vector>,
    {
        self.ensure_same_size(other, op)?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(lhs, rhs)| f(lhs, rhs))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn checked_add(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        log::debug!("Adding matrices");
        self.zip_rows(other, "addition", Vector::checked_add)
    }

    /// In-place addition. Follows [`Vector::add_assign`]: only sizes are checked.
    pub fn add_assign(&mut self, other: &SquareMatrix) -> Result<&mut Self> {
        log::debug!("Adding matrix in place");
        self.ensure_same_size(other, "addition")?;
        for (row, rhs) in self.rows.iter_mut().zip(&other.rows) {
            row.add_assign(rhs)?;
        }
        Ok(self)
    }

    pub fn checked_sub(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        log::debug!("Subtracting matrices");
        self.zip_rows(other, "subtraction", Vector::checked_sub)
    }

    pub fn sub_assign(&mut self, other: &SquareMatrix) -> Result<&mut Self> {
        log::debug!("Subtracting matrix in place");
        self.ensure_same_size(other, "subtraction")?;
        for (row, rhs) in self.rows.iter_mut().zip(&other.rows) {
            row.sub_assign(rhs)?;
        }
        Ok(self)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        log::debug!("Element-wise matrix product");
        self.zip_rows(other, "element-wise multiplication", Vector::hadamard)
    }

    pub fn hadamard_assign(&mut self, other: &SquareMatrix) -> Result<&mut Self> {
        log::debug!("Element-wise matrix product in place");
        *self = self.hadamard(other)?;
        Ok(self)
    }

    /// Matrix product `self * other`.
    ///
    /// The columns of `other` are extracted with
    /// [`Vector::transpose_columns_to_rows`], then every cell of the result
    /// is the dot product of a row of `self` with one of those columns.
    pub fn matmul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        log::debug!("Multiplying {}x{} matrices", self.size(), self.size());
        self.ensure_same_size(other, "multiplication")?;
        self.ensure_square()?;
        other.ensure_square()?;
        if self.is_empty() {
            return Ok(Self::default());
        }
        let columns = Vector::transpose_columns_to_rows(&other.rows)?;
        self.map_rows(|row| {
            columns
                .iter()
                .map(|col| row.dot(col).map(Cell::new))
                .collect::<Result<Vec<_>>>()
                .map(Vector::from_cells)
        })
    }

    pub fn mul_scalar(&self, scalar: f64) -> Result<SquareMatrix> {
        log::debug!("Scaling matrix by {}", scalar);
        self.map_rows(|row| row.mul_scalar(scalar))
    }

    pub fn mul_scalar_assign(&mut self, scalar: f64) -> Result<&mut Self> {
        log::debug!("Scaling matrix by {} in place", scalar);
        self.ensure_initialized("Cannot multiply uninitialized cell")?;
        for row in &mut self.rows {
            row.mul_scalar_assign(scalar)?;
        }
        Ok(self)
    }

    pub fn div_scalar(&self, scalar: f64) -> Result<SquareMatrix> {
        log::debug!("Dividing matrix by {}", scalar);
        if scalar == 0.0 {
            return Err(SqmatError::logic("Division by zero"));
        }
        self.map_rows(|row| row.div_scalar(scalar))
    }

    pub fn div_scalar_assign(&mut self, scalar: f64) -> Result<&mut Self> {
        log::debug!("Dividing matrix by {} in place", scalar);
        if scalar == 0.0 {
            return Err(SqmatError::logic("Division by zero"));
        }
        self.ensure_initialized("Cannot divide uninitialized cell")?;
        for row in &mut self.rows {
            row.div_scalar_assign(scalar)?;
        }
        Ok(self)
    }

    /// Integer remainder of every cell, see [`Vector::rem_scalar`].
    pub fn rem_scalar(&self, modulus: i64) -> Result<SquareMatrix> {
        log::debug!("Matrix remainder by {}", modulus);
        if modulus == 0 {
            return Err(SqmatError::logic("Modulo by zero"));
        }
        self.map_rows(|row| row.rem_scalar(modulus))
    }

    pub fn rem_scalar_assign(&mut self, modulus: i64) -> Result<&mut Self> {
        log::debug!("Matrix remainder by {} in place", modulus);
        *self = self.rem_scalar(modulus)?;
        Ok(self)
    }

    /// Raises the matrix to a non-negative integer power by repeated squaring.
    /// `power == 0` yields the identity even for a matrix with unset cells.
    pub fn pow(&self, power: i64) -> Result<SquareMatrix> {
        log::debug!("Raising matrix to power {}", power);
        if power < 0 {
            return Err(SqmatError::logic("Matrix power must be non-negative"));
        }
        let mut result = Self::identity(self.size());
        let mut base = self.clone();
        let mut remaining = power;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.matmul(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.matmul(&base)?;
            }
        }
        Ok(result)
    }

    pub fn checked_neg(&self) -> Result<SquareMatrix> {
        log::debug!("Negating matrix");
        self.map_rows(Vector::checked_neg)
    }

    fn shift_rows(
        &mut self,
        msg: &str,
        shift: fn(&mut Vector) -> Result<&mut Vector>,
    ) -> Result<&mut Self> {
        self.ensure_initialized(msg)?;
        for row in &mut self.rows {
            shift(row)?;
        }
        Ok(self)
    }

    /// Adds 1 to every cell (prefix form).
    pub fn increment(&mut self) -> Result<&mut Self> {
        log::debug!("Incrementing matrix");
        self.shift_rows("Cannot increment uninitialized cell", Vector::increment)
    }

    /// Adds 1 to every cell and returns the previous contents (postfix form).
    pub fn post_increment(&mut self) -> Result<SquareMatrix> {
        log::debug!("Post-incrementing matrix");
        let previous = self.clone();
        self.increment()?;
        Ok(previous)
    }

    pub fn decrement(&mut self) -> Result<&mut Self> {
        log::debug!("Decrementing matrix");
        self.shift_rows("Cannot decrement uninitialized cell", Vector::decrement)
    }

    pub fn post_decrement(&mut self) -> Result<SquareMatrix> {
        log::debug!("Post-decrementing matrix");
        let previous = self.clone();
        self.decrement()?;
        Ok(previous)
    }

    /// Transposes the matrix in place. Every cell must be written.
    pub fn transpose(&mut self) -> Result<&mut Self> {
        log::debug!("Transposing matrix in place");
        self.ensure_square()?;
        if !self.is_empty() {
            self.rows = Vector::transpose_columns_to_rows(&self.rows)?;
        }
        Ok(self)
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// Runs in `O(n!)`; intended for small matrices. The empty matrix has
    /// determinant 1.0.
    pub fn determinant(&self) -> Result<f64> {
        log::debug!("Computing determinant of {}x{} matrix", self.size(), self.size());
        self.ensure_square()?;
        self.ensure_initialized("Matrix must be fully initialized to compute determinant")?;
        let at = |r: usize, c: usize| self.rows[r].raw(c);
        match self.size() {
            0 => Ok(1.0),
            1 => Ok(at(0, 0)),
            2 => Ok(at(0, 0) * at(1, 1) - at(0, 1) * at(1, 0)),
            n => (0..n).try_fold(0.0, |det, col| -> Result<f64> {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                Ok(det + sign * at(0, col) * self.submatrix(0, col).determinant()?)
            }),
        }
    }

    /// Determinant of the matrix left after removing `row` and `col`.
    pub fn minor(&self, row: isize, col: isize) -> Result<f64> {
        log::debug!("Computing minor ({}, {})", row, col);
        self.ensure_square()?;
        let r = self.checked_row(row)?;
        let c = usize::try_from(col)
            .ok()
            .filter(|&c| c < self.size())
            .ok_or(SqmatError::IndexOutOfBounds {
                index: col,
                len: self.size(),
            })?;
        self.submatrix(r, c).determinant()
    }

    fn submatrix(&self, skip_row: usize, skip_col: usize) -> SquareMatrix {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(r, _)| r != skip_row)
            .map(|(_, row)| {
                Vector::from_cells(
                    row.iter()
                        .enumerate()
                        .filter(|&(c, _)| c != skip_col)
                        .map(|(_, cell)| *cell)
                        .collect(),
                )
            })
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<Vector>> for SquareMatrix {
    type Error = SqmatError;

    fn try_from(rows: Vec<Vector>) -> Result<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != n) {
            return Err(SqmatError::logic(format!(
                "Row {bad} has length {} but the matrix has {n} rows",
                rows[bad].len()
            )));
        }
        Ok(Self { rows })
    }
}

impl From<SquareMatrix> for Vec<Vector> {
    fn from(matrix: SquareMatrix) -> Self {
        matrix.rows
    }
}

impl Shape for SquareMatrix {
    fn len(&self) -> usize {
        self.size()
    }

    fn all_initialized(&self) -> bool {
        SquareMatrix::all_initialized(self)
    }
}

impl SumOrd for SquareMatrix {
    fn total(&self) -> Result<f64> {
        self.sum()
    }
}

/// One row per line, each rendered like [`Vector`].
impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
