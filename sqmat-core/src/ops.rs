//! `std::ops` sugar over the checked methods of [`Vector`] and [`SquareMatrix`].
//!
//! Every operator is implemented on references and yields a `Result`, so an
//! expression reads `(&a + &b)?`. Compound assignment has no `Result`-returning
//! trait form; use the `*_assign` methods instead.

use crate::error::Result;
use crate::matrix::SquareMatrix;
use crate::vector::Vector;
use std::ops::{Add, BitXor, Div, Mul, Neg, Not, Rem, Sub};

macro_rules! checked_binop {
    ($op:ident, $op_fn:ident, $lhs:ty, $rhs:ty, $out:ty, $method:ident) => {
        impl $op<$rhs> for &$lhs {
            type Output = Result<$out>;

            fn $op_fn(self, rhs: $rhs) -> Self::Output {
                <$lhs>::$method(self, rhs)
            }
        }
    };
}

checked_binop!(Add, add, Vector, &Vector, Vector, checked_add);
checked_binop!(Sub, sub, Vector, &Vector, Vector, checked_sub);
checked_binop!(Mul, mul, Vector, &Vector, f64, dot);
checked_binop!(Rem, rem, Vector, &Vector, Vector, hadamard);
checked_binop!(Mul, mul, Vector, f64, Vector, mul_scalar);
checked_binop!(Div, div, Vector, f64, Vector, div_scalar);
checked_binop!(Rem, rem, Vector, i64, Vector, rem_scalar);

checked_binop!(Add, add, SquareMatrix, &SquareMatrix, SquareMatrix, checked_add);
checked_binop!(Sub, sub, SquareMatrix, &SquareMatrix, SquareMatrix, checked_sub);
checked_binop!(Mul, mul, SquareMatrix, &SquareMatrix, SquareMatrix, matmul);
checked_binop!(Rem, rem, SquareMatrix, &SquareMatrix, SquareMatrix, hadamard);
checked_binop!(Mul, mul, SquareMatrix, f64, SquareMatrix, mul_scalar);
checked_binop!(Div, div, SquareMatrix, f64, SquareMatrix, div_scalar);
checked_binop!(Rem, rem, SquareMatrix, i64, SquareMatrix, rem_scalar);
// `^` is matrix power
checked_binop!(BitXor, bitxor, SquareMatrix, i64, SquareMatrix, pow);

impl Neg for &Vector {
    type Output = Result<Vector>;

    fn neg(self) -> Self::Output {
        self.checked_neg()
    }
}

impl Neg for &SquareMatrix {
    type Output = Result<SquareMatrix>;

    fn neg(self) -> Self::Output {
        self.checked_neg()
    }
}

/// `!m` is the determinant of `m`.
impl Not for &SquareMatrix {
    type Output = Result<f64>;

    fn not(self) -> Self::Output {
        self.determinant()
    }
}
