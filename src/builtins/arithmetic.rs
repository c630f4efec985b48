//! Integer arithmetic: + - * /

use super::{numbers, wrong_arity};
use crate::error::{Error, Result};
use crate::parser::Expression;
use crate::runtime::Environment;

/// Register the arithmetic procedures
pub fn register(env: &Environment) {
    env.define_builtin("+", add);
    env.define_builtin("-", subtract);
    env.define_builtin("*", multiply);
    env.define_builtin("/", divide);
}

fn checked(procedure: &str, value: Option<i64>) -> Result<i64> {
    value.ok_or_else(|| Error::primitive(procedure, "integer overflow"))
}

fn quotient(dividend: i64, divisor: i64) -> Result<i64> {
    if divisor == 0 {
        return Err(Error::primitive("/", "division by zero"));
    }
    checked("/", dividend.checked_div(divisor))
}

/// (+ a b ...) - Sum, 0 with no arguments
fn add(args: &[Expression]) -> Result<Expression> {
    numbers("+", args)?
        .into_iter()
        .try_fold(0i64, |acc, n| checked("+", acc.checked_add(n)))
        .map(Expression::from)
}

/// (* a b ...) - Product, 1 with no arguments
fn multiply(args: &[Expression]) -> Result<Expression> {
    numbers("*", args)?
        .into_iter()
        .try_fold(1i64, |acc, n| checked("*", acc.checked_mul(n)))
        .map(Expression::from)
}

/// (- a b ...) - Negation with one argument, left-folded difference otherwise
fn subtract(args: &[Expression]) -> Result<Expression> {
    let nums = numbers("-", args)?;
    match nums.split_first() {
        None => Err(wrong_arity("-", "at least 1", 0)),
        Some((first, [])) => checked("-", first.checked_neg()).map(Expression::from),
        Some((first, rest)) => rest
            .iter()
            .try_fold(*first, |acc, n| checked("-", acc.checked_sub(*n)))
            .map(Expression::from),
    }
}

/// (/ a b ...) - Reciprocal with one argument, left-folded truncating quotient otherwise
fn divide(args: &[Expression]) -> Result<Expression> {
    let nums = numbers("/", args)?;
    match nums.split_first() {
        None => Err(wrong_arity("/", "at least 1", 0)),
        Some((first, [])) => quotient(1, *first).map(Expression::from),
        Some((first, rest)) => rest
            .iter()
            .try_fold(*first, |acc, n| quotient(acc, *n))
            .map(Expression::from),
    }
}
