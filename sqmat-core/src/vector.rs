use crate::cell::Cell;
use crate::error::{Result, SqmatError};
use crate::traits::{require_initialized, Shape, SumOrd};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-length sequence of cells that tracks which elements were written.
///
/// Every element starts unset. Writes through [`Vector::set`] or
/// [`Vector::get_mut`] mark the element as initialized; most arithmetic
/// refuses to read unset elements and fails with [`SqmatError::LogicError`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    cells: Vec<Cell>,
}

/// Maps a signed index onto `[0, len)`.
fn checked_index(index: isize, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(SqmatError::IndexOutOfBounds { index, len })
}

/// Integer remainder of `value` truncated toward zero.
fn truncating_rem(value: f64, modulus: i64) -> Result<f64> {
    let truncated = value.to_i64().ok_or_else(|| {
        SqmatError::logic(format!("Cannot truncate {value} to an integer for modulo"))
    })?;
    Ok(truncated.wrapping_rem(modulus) as f64)
}

impl Vector {
    /// Creates a vector of `size` unset elements.
    ///
    /// # Errors
    /// Returns [`SqmatError::InvalidSize`] when `size` is negative.
    pub fn new(size: isize) -> Result<Self> {
        let len = usize::try_from(size).map_err(|_| SqmatError::InvalidSize(size))?;
        log::info!("Creating vector of length {}", len);
        Ok(Self::with_len(len))
    }

    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            cells: vec![Cell::default(); len],
        }
    }

    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Creates a fully initialized vector holding `values`.
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            cells: values.iter().copied().map(Cell::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Reads an element; `None` when it was never written.
    pub fn get(&self, index: isize) -> Result<Option<f64>> {
        let i = checked_index(index, self.len())?;
        log::debug!("Reading element {}", i);
        Ok(self.cells[i].value())
    }

    /// Reads an element that must have been written.
    pub fn value(&self, index: isize) -> Result<f64> {
        self.get(index)?.ok_or_else(|| {
            SqmatError::logic(format!("Element at index {index} is not initialized"))
        })
    }

    pub fn set(&mut self, index: isize, value: f64) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Write access to an element. The element is marked initialized even if
    /// the caller only reads through the returned reference.
    pub fn get_mut(&mut self, index: isize) -> Result<&mut f64> {
        let i = checked_index(index, self.len())?;
        log::debug!("Writing element {}", i);
        Ok(self.cells[i].value_mut())
    }

    pub fn is_initialized(&self, index: isize) -> Result<bool> {
        let i = checked_index(index, self.len())?;
        Ok(self.cells[i].is_initialized())
    }

    pub fn all_initialized(&self) -> bool {
        self.cells.iter().all(Cell::is_initialized)
    }

    /// Stored number at `i`, 0.0 when unset. `i` must be in bounds.
    pub(crate) fn raw(&self, i: usize) -> f64 {
        self.cells[i].raw()
    }

    pub fn sum(&self) -> Result<f64> {
        self.cells
            .iter()
            .map(|cell| {
                cell.value()
                    .ok_or_else(|| SqmatError::logic("Uninitialized cell in vector during sum()"))
            })
            .sum()
    }

    fn ensure_same_len(&self, other: &Vector, op: &str) -> Result<()> {
        if self.len() != other.len() {
            return Err(SqmatError::logic(format!(
                "Vector sizes must match for {op} ({} != {})",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }

    fn ensure_initialized(&self, msg: &str) -> Result<()> {
        require_initialized(self, msg)
    }

    /// Pairs up elements and applies `f`, failing at the first index where
    /// either side is unset.
    fn zip_initialized<F>(&self, other: &Vector, op: &str, f: F) -> Result<Vec<f64>>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.ensure_same_len(other, op)?;
        self.cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| match (a.value(), b.value()) {
                (Some(a), Some(b)) => Ok(f(a, b)),
                _ => Err(SqmatError::logic(format!(
                    "Both vectors must be fully initialized for {op}"
                ))),
            })
            .collect()
    }

    /// Applies `f` to every element, failing at the first unset one.
    fn map_initialized<F>(&self, msg: &str, f: F) -> Result<Vector>
    where
        F: Fn(f64) -> Result<f64>,
    {
        self.cells
            .iter()
            .map(|cell| match cell.value() {
                Some(v) => f(v).map(Cell::new),
                None => Err(SqmatError::logic(msg)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Vector::from_cells)
    }

    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        log::debug!("Adding vectors of length {}", self.len());
        let values = self.zip_initialized(other, "addition", |a, b| a + b)?;
        Ok(Vector::from_slice(&values))
    }

    /// In-place addition. Only lengths are checked; unset elements keep
    /// their unset state and unset operands contribute 0.0.
    pub fn add_assign(&mut self, other: &Vector) -> Result<&mut Self> {
        log::debug!("Adding vector in place");
        self.ensure_same_len(other, "addition")?;
        for (cell, rhs) in self.cells.iter_mut().zip(&other.cells) {
            cell.overwrite_raw(cell.raw() + rhs.raw());
        }
        Ok(self)
    }

    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        log::debug!("Subtracting vectors of length {}", self.len());
        let values = self.zip_initialized(other, "subtraction", |a, b| a - b)?;
        Ok(Vector::from_slice(&values))
    }

    /// In-place subtraction, with the same relaxed checks as [`Vector::add_assign`].
    pub fn sub_assign(&mut self, other: &Vector) -> Result<&mut Self> {
        log::debug!("Subtracting vector in place");
        self.ensure_same_len(other, "subtraction")?;
        for (cell, rhs) in self.cells.iter_mut().zip(&other.cells) {
            cell.overwrite_raw(cell.raw() - rhs.raw());
        }
        Ok(self)
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        log::debug!("Dot product of length {}", self.len());
        Ok(self
            .zip_initialized(other, "dot product", |a, b| a * b)?
            .into_iter()
            .sum())
    }

    /// Element-wise product.
    pub fn hadamard(&self, other: &Vector) -> Result<Vector> {
        log::debug!("Element-wise vector product");
        let values = self.zip_initialized(other, "element-wise multiplication", |a, b| a * b)?;
        Ok(Vector::from_slice(&values))
    }

    pub fn checked_neg(&self) -> Result<Vector> {
        log::debug!("Negating vector");
        self.ensure_initialized("Cannot negate uninitialized cell in vector")?;
        self.map_initialized("Cannot negate uninitialized cell in vector", |v| Ok(-v))
    }

    pub fn mul_scalar(&self, scalar: f64) -> Result<Vector> {
        log::debug!("Scaling vector by {}", scalar);
        self.map_initialized("Cannot multiply uninitialized cell", |v| Ok(v * scalar))
    }

    pub fn mul_scalar_assign(&mut self, scalar: f64) -> Result<&mut Self> {
        log::debug!("Scaling vector by {} in place", scalar);
        self.ensure_initialized("Cannot multiply uninitialized cell")?;
        for cell in &mut self.cells {
            cell.overwrite_raw(cell.raw() * scalar);
        }
        Ok(self)
    }

    pub fn div_scalar(&self, scalar: f64) -> Result<Vector> {
        log::debug!("Dividing vector by {}", scalar);
        if scalar == 0.0 {
            return Err(SqmatError::logic("Division by zero"));
        }
        self.map_initialized("Cannot divide uninitialized cell", |v| Ok(v / scalar))
    }

    pub fn div_scalar_assign(&mut self, scalar: f64) -> Result<&mut Self> {
        log::debug!("Dividing vector by {} in place", scalar);
        if scalar == 0.0 {
            return Err(SqmatError::logic("Division by zero"));
        }
        self.ensure_initialized("Cannot divide uninitialized cell")?;
        for cell in &mut self.cells {
            cell.overwrite_raw(cell.raw() / scalar);
        }
        Ok(self)
    }

    /// Truncates every element to an integer and takes its remainder by
    /// `modulus`. The remainder carries the sign of the element.
    pub fn rem_scalar(&self, modulus: i64) -> Result<Vector> {
        log::debug!("Vector remainder by {}", modulus);
        if modulus == 0 {
            return Err(SqmatError::logic("Modulo by zero"));
        }
        self.map_initialized("Cannot modulo uninitialized cell", |v| {
            truncating_rem(v, modulus)
        })
    }

    pub fn rem_scalar_assign(&mut self, modulus: i64) -> Result<&mut Self> {
        log::debug!("Vector remainder by {} in place", modulus);
        *self = self.rem_scalar(modulus)?;
        Ok(self)
    }

    fn shift_all(&mut self, delta: f64, msg: &str) -> Result<&mut Self> {
        self.ensure_initialized(msg)?;
        for cell in &mut self.cells {
            cell.overwrite_raw(cell.raw() + delta);
        }
        Ok(self)
    }

    /// Adds 1 to every element (prefix form).
    pub fn increment(&mut self) -> Result<&mut Self> {
        log::debug!("Incrementing vector");
        self.shift_all(1.0, "Cannot increment uninitialized cell")
    }

    /// Adds 1 to every element and returns the previous contents (postfix form).
    pub fn post_increment(&mut self) -> Result<Vector> {
        log::debug!("Post-incrementing vector");
        let previous = self.clone();
        self.increment()?;
        Ok(previous)
    }

    pub fn decrement(&mut self) -> Result<&mut Self> {
        log::debug!("Decrementing vector");
        self.shift_all(-1.0, "Cannot decrement uninitialized cell")
    }

    pub fn post_decrement(&mut self) -> Result<Vector> {
        log::debug!("Post-decrementing vector");
        let previous = self.clone();
        self.decrement()?;
        Ok(previous)
    }

    /// Converts `columns.len()` column vectors of equal length `R` into `R`
    /// row vectors of length `columns.len()`.
    ///
    /// # Errors
    /// Returns [`SqmatError::LogicError`] if `columns` is empty, if the
    /// columns differ in length, or if any source cell is unset.
    pub fn transpose_columns_to_rows(columns: &[Vector]) -> Result<Vec<Vector>> {
        log::debug!("Transposing {} columns into rows", columns.len());
        let first = columns
            .first()
            .ok_or_else(|| SqmatError::logic("Cannot transpose an empty set of columns"))?;
        let row_len = first.len();
        if columns.iter().any(|col| col.len() != row_len) {
            return Err(SqmatError::logic("All column vectors must be the same size"));
        }

        // Rows built so far are dropped if a later cell is unset.
        (0..row_len)
            .map(|i| {
                columns
                    .iter()
                    .map(|col| {
                        col.cells[i].value().map(Cell::new).ok_or_else(|| {
                            SqmatError::logic("Column vector is not fully initialized")
                        })
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Vector::from_cells)
            })
            .collect()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::from_slice(&values)
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl Shape for Vector {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn all_initialized(&self) -> bool {
        Vector::all_initialized(self)
    }
}

impl SumOrd for Vector {
    fn total(&self) -> Result<f64> {
        self.sum()
    }
}

const SIGNIFICANT_DIGITS: usize = 6;

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Formats `value` with six significant digits, dropping trailing zeros.
///
/// Switches to `1.5e+07` style when the decimal exponent is below -4 or at
/// least six, so `1.0 / 3.0` renders as `0.333333` and `1e-10` as `1e-10`.
fn format_general(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    // Rounding to the target precision first settles the exponent (9.999995 -> 1e1)
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exp)) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return value.to_string();
    };
    if exp < -4 || exp >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.unsigned_abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Renders `<value> ` per written element and `[ ] ` per unset one.
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell.value() {
                Some(v) => write!(f, "{} ", format_general(v))?,
                None => f.write_str("[ ] ")?,
            }
        }
        Ok(())
    }
}
