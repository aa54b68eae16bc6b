use thiserror::Error;

pub type Result<T> = core::result::Result<T, SqmatError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqmatError {
    #[error("Invalid size: {0}")]
    InvalidSize(isize),

    #[error("Index {index} out of range for vector of length {len}")]
    IndexOutOfBounds { index: isize, len: usize },

    #[error("Row index {row} out of range for matrix of size {size}")]
    RowIndexOutOfBounds { row: isize, size: usize },

    /// Size mismatches, uninitialized operands, division or modulo by zero,
    /// negative matrix power.
    #[error("{0}")]
    LogicError(String),
}

impl SqmatError {
    pub(crate) fn logic(msg: impl Into<String>) -> Self {
        SqmatError::LogicError(msg.into())
    }

    /// True for the umbrella logic-error kind.
    pub fn is_logic_error(&self) -> bool {
        matches!(self, SqmatError::LogicError(_))
    }
}
