//! List construction and inspection

use super::{list_arg, wrong_arity};
use crate::error::{Error, Result};
use crate::parser::Expression;
use crate::runtime::Environment;

/// Register the list procedures
pub fn register(env: &Environment) {
    env.define_builtin("list", list);
    env.define_builtin("cons", cons);
    env.define_builtin("first", first);
    env.define_builtin("rest", rest);
    env.define_builtin("empty?", is_empty);
    env.define_builtin("length", length);
}

fn single<'a>(procedure: &str, args: &'a [Expression]) -> Result<&'a Expression> {
    match args {
        [arg] => Ok(arg),
        _ => Err(wrong_arity(procedure, "1", args.len())),
    }
}

/// (list a b ...) - A list of the arguments
fn list(args: &[Expression]) -> Result<Expression> {
    Ok(Expression::List(args.to_vec()))
}

/// (cons x xs) - New list with x in front
fn cons(args: &[Expression]) -> Result<Expression> {
    let [head, tail] = args else {
        return Err(wrong_arity("cons", "2", args.len()));
    };
    let tail = list_arg("cons", tail)?;

    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(head.clone());
    items.extend_from_slice(tail);
    Ok(Expression::List(items))
}

fn first(args: &[Expression]) -> Result<Expression> {
    let items = list_arg("first", single("first", args)?)?;
    items
        .first()
        .cloned()
        .ok_or_else(|| Error::primitive("first", "empty list"))
}

fn rest(args: &[Expression]) -> Result<Expression> {
    let items = list_arg("rest", single("rest", args)?)?;
    match items.split_first() {
        Some((_, tail)) => Ok(Expression::List(tail.to_vec())),
        None => Err(Error::primitive("rest", "empty list")),
    }
}

fn is_empty(args: &[Expression]) -> Result<Expression> {
    let items = list_arg("empty?", single("empty?", args)?)?;
    Ok(Expression::from(items.is_empty()))
}

fn length(args: &[Expression]) -> Result<Expression> {
    let items = list_arg("length", single("length", args)?)?;
    i64::try_from(items.len())
        .map(Expression::from)
        .map_err(|_| Error::primitive("length", "integer overflow"))
}
