//! # Square Matrix Core Library
//!
//! Dense vectors and square matrices whose cells remember whether they were
//! ever written. Arithmetic that reads an unset cell fails with
//! [`SqmatError::LogicError`] instead of silently using a default value.
//!
//! Operations log their entry through the `log` facade at `debug` level.
//! Nothing is emitted unless the host installs a logger.

pub mod cell;
pub mod error;
pub mod matrix;
mod ops;
pub mod traits;
pub mod vector;

pub use cell::Cell;
pub use error::{Result, SqmatError};
pub use matrix::SquareMatrix;
pub use traits::{Shape, SumOrd, SUM_TOLERANCE};
pub use vector::Vector;
