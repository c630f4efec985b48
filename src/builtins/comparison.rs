//! Binary comparisons: = < > <= >=

use std::cmp::Ordering;

use super::{wrong_arity, wrong_type};
use crate::error::Result;
use crate::parser::Expression;
use crate::runtime::Environment;

/// Register the comparison procedures
pub fn register(env: &Environment) {
    env.define_builtin("=", equal);
    env.define_builtin("<", less);
    env.define_builtin(">", greater);
    env.define_builtin("<=", less_equal);
    env.define_builtin(">=", greater_equal);
    env.define_builtin("not", not);
}

fn compare(procedure: &str, args: &[Expression], test: fn(Ordering) -> bool) -> Result<Expression> {
    match args {
        [Expression::Number(a), Expression::Number(b)] => Ok(Expression::from(test(a.cmp(b)))),
        [Expression::Number(_), other] | [other, _] => Err(wrong_type(procedure, "number", other)),
        _ => Err(wrong_arity(procedure, "2", args.len())),
    }
}

/// (= a b) - Numbers or booleans
fn equal(args: &[Expression]) -> Result<Expression> {
    match args {
        [Expression::Bool(a), Expression::Bool(b)] => Ok(Expression::from(a == b)),
        _ => compare("=", args, Ordering::is_eq),
    }
}

fn less(args: &[Expression]) -> Result<Expression> {
    compare("<", args, Ordering::is_lt)
}

fn greater(args: &[Expression]) -> Result<Expression> {
    compare(">", args, Ordering::is_gt)
}

fn less_equal(args: &[Expression]) -> Result<Expression> {
    compare("<=", args, Ordering::is_le)
}

fn greater_equal(args: &[Expression]) -> Result<Expression> {
    compare(">=", args, Ordering::is_ge)
}

/// (not x) - Same truthiness as `if`
fn not(args: &[Expression]) -> Result<Expression> {
    match args {
        [value] => Ok(Expression::from(!value.is_truthy())),
        _ => Err(wrong_arity("not", "1", args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn pair(a: i64, b: i64) -> [Expression; 2] {
        [Expression::Number(a), Expression::Number(b)]
    }

    #[test]
    fn test_ordering() {
        assert_eq!(less(&pair(1, 2)).unwrap(), Expression::Bool(true));
        assert_eq!(less(&pair(2, 2)).unwrap(), Expression::Bool(false));
        assert_eq!(greater(&pair(3, 2)).unwrap(), Expression::Bool(true));
        assert_eq!(less_equal(&pair(2, 2)).unwrap(), Expression::Bool(true));
        assert_eq!(greater_equal(&pair(1, 2)).unwrap(), Expression::Bool(false));
    }

    #[test]
    fn test_equal() {
        assert_eq!(equal(&pair(4, 4)).unwrap(), Expression::Bool(true));
        assert_eq!(equal(&pair(4, 5)).unwrap(), Expression::Bool(false));
        assert_eq!(
            equal(&[Expression::Bool(true), Expression::Bool(true)]).unwrap(),
            Expression::Bool(true)
        );
        assert_eq!(
            equal(&[Expression::Bool(true), Expression::Number(1)]).unwrap_err().kind(),
            "primitive"
        );
    }

    #[test]
    fn test_arity_is_binary() {
        assert_eq!(
            less(&[Expression::Number(1)]).unwrap_err(),
            Error::primitive("<", "expected 2 arguments, got 1")
        );
        assert!(less(&[Expression::Number(1), Expression::Number(2), Expression::Number(3)]).is_err());
    }

    #[test]
    fn test_type_error_names_offending_argument() {
        let err = greater(&[Expression::Number(1), Expression::symbol("a")]).unwrap_err();
        assert_eq!(err, Error::primitive(">", "expected number, got symbol a"));

        let err = greater(&[Expression::Bool(false), Expression::Number(1)]).unwrap_err();
        assert_eq!(err, Error::primitive(">", "expected number, got bool false"));
    }

    #[test]
    fn test_not() {
        assert_eq!(not(&[Expression::Bool(false)]).unwrap(), Expression::Bool(true));
        assert_eq!(not(&[Expression::Number(0)]).unwrap(), Expression::Bool(false));
        assert!(not(&[]).is_err());
    }
}
