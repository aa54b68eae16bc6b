use crate::error::{Result, SqmatError};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Absolute/relative tolerance used when two sums are compared for equality.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Common shape queries for the dense containers.
pub trait Shape: Debug {
    /// Returns the number of elements (vector) or rows (matrix).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True iff every cell has been written at least once.
    fn all_initialized(&self) -> bool;
}

/// Fails with a [`SqmatError::LogicError`] carrying `msg` unless every cell
/// of `container` is written.
pub(crate) fn require_initialized<S: Shape + ?Sized>(container: &S, msg: &str) -> Result<()> {
    if !container.all_initialized() {
        return Err(SqmatError::logic(msg));
    }
    Ok(())
}

/// Ordering of containers by the total of their elements.
///
/// Two containers with the same total compare equal regardless of shape or
/// layout. Every comparison fails with the error of [`SumOrd::total`] when a
/// cell is uninitialized.
pub trait SumOrd {
    /// Sum of every element.
    fn total(&self) -> Result<f64>;

    fn sum_cmp(&self, other: &Self) -> Result<Ordering> {
        let (lhs, rhs) = (self.total()?, other.total()?);
        Ok(compare_with_tolerance(lhs, rhs))
    }

    fn sum_eq(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? == Ordering::Equal)
    }

    fn sum_ne(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? != Ordering::Equal)
    }

    fn sum_lt(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? == Ordering::Less)
    }

    fn sum_gt(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? == Ordering::Greater)
    }

    fn sum_le(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? != Ordering::Greater)
    }

    fn sum_ge(&self, other: &Self) -> Result<bool> {
        Ok(self.sum_cmp(other)? != Ordering::Less)
    }
}

pub(crate) fn compare_with_tolerance(lhs: f64, rhs: f64) -> Ordering {
    let scale = 1.0_f64.max(lhs.abs()).max(rhs.abs());
    if (lhs - rhs).abs() <= SUM_TOLERANCE * scale {
        Ordering::Equal
    } else if lhs < rhs {
        Ordering::Less
    } else {
        // NaN totals land here as well
        Ordering::Greater
    }
}
