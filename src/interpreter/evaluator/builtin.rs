use crate::{
    ast::{BinaryOperator, UnaryOperator},
    util::num::round_to_i64,
};

/// Applies a unary builtin to a number.
///
/// `inv` negates. Domain errors follow IEEE semantics, e.g. `sqrt` of a
/// negative number is `NaN`.
///
/// # Example
/// ```
/// use sythin::{ast::UnaryOperator, interpreter::evaluator::builtin::apply_unary};
///
/// assert_eq!(apply_unary(UnaryOperator::Inv, 2.0), -2.0);
/// assert_eq!(apply_unary(UnaryOperator::Floor, -0.5), -1.0);
/// ```
#[must_use]
pub fn apply_unary(op: UnaryOperator, x: f64) -> f64 {
    match op {
        UnaryOperator::Sin => x.sin(),
        UnaryOperator::Cos => x.cos(),
        UnaryOperator::Exp => x.exp(),
        UnaryOperator::Inv => -x,
        UnaryOperator::Abs => x.abs(),
        UnaryOperator::Floor => x.floor(),
        UnaryOperator::Round => x.round(),
        UnaryOperator::Ceil => x.ceil(),
        UnaryOperator::Sqrt => x.sqrt(),
    }
}

/// Applies a binary builtin to its two operands, first operand on the left.
///
/// - `plus`, `minus`, `mult`, `divide`: IEEE arithmetic, so `1 / 0` is `inf`.
/// - `eq`, `neq`: compare the operands rounded to 64-bit integers.
/// - `lt`, `lteq`, `gt`, `gteq`: compare the raw doubles.
/// - `mod`: floating remainder with the sign of the dividend.
/// - `pow`: exponentiation.
///
/// Comparisons return `1` for true and `0` for false.
///
/// # Example
/// ```
/// use sythin::{ast::BinaryOperator, interpreter::evaluator::builtin::apply_binary};
///
/// assert_eq!(apply_binary(BinaryOperator::Pow, 2.0, 10.0), 1024.0);
/// assert_eq!(apply_binary(BinaryOperator::Eq, 2.6, 3.4), 1.0);
/// assert_eq!(apply_binary(BinaryOperator::Lt, 2.6, 3.4), 1.0);
/// ```
#[must_use]
pub fn apply_binary(op: BinaryOperator, a: f64, b: f64) -> f64 {
    match op {
        BinaryOperator::Plus => a + b,
        BinaryOperator::Minus => a - b,
        BinaryOperator::Mult => a * b,
        BinaryOperator::Divide => a / b,
        BinaryOperator::Eq => truth(round_to_i64(a) == round_to_i64(b)),
        BinaryOperator::Neq => truth(round_to_i64(a) != round_to_i64(b)),
        BinaryOperator::Lt => truth(a < b),
        BinaryOperator::LtEq => truth(a <= b),
        BinaryOperator::Gt => truth(a > b),
        BinaryOperator::GtEq => truth(a >= b),
        BinaryOperator::Mod => a % b,
        BinaryOperator::Pow => a.powf(b),
    }
}

const fn truth(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(apply_binary(BinaryOperator::Divide, 1.0, 0.0), f64::INFINITY);
        assert!(apply_binary(BinaryOperator::Divide, 0.0, 0.0).is_nan());
    }

    #[test]
    fn equality_rounds_but_ordering_does_not() {
        assert_eq!(apply_binary(BinaryOperator::Neq, 1.2, 0.8), 0.0);
        assert_eq!(apply_binary(BinaryOperator::Gt, 1.2, 0.8), 1.0);
        assert_eq!(apply_binary(BinaryOperator::GtEq, 1.0, 1.0), 1.0);
        assert_eq!(apply_binary(BinaryOperator::LtEq, 1.5, 1.0), 0.0);
    }

    #[test]
    fn remainder_keeps_dividend_sign() {
        assert_eq!(apply_binary(BinaryOperator::Mod, 7.5, 2.0), 1.5);
        assert_eq!(apply_binary(BinaryOperator::Mod, -7.0, 3.0), -1.0);
    }

    #[test]
    fn unary_rounding_family() {
        assert_eq!(apply_unary(UnaryOperator::Round, 2.5), 3.0);
        assert_eq!(apply_unary(UnaryOperator::Ceil, 2.1), 3.0);
        assert_eq!(apply_unary(UnaryOperator::Abs, -4.0), 4.0);
        assert!(apply_unary(UnaryOperator::Sqrt, -1.0).is_nan());
        assert_eq!(apply_unary(UnaryOperator::Exp, 0.0), 1.0);
    }
}
