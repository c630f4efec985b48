//! Built-in procedures and the default global environment
//!
//! Every procedure receives already evaluated arguments and reports failures
//! as [`Error::PrimitiveError`] naming itself.

mod arithmetic;
mod comparison;
mod lists;

use tracing::debug;

use crate::error::{argument_noun, Error, Result};
use crate::parser::Expression;
use crate::runtime::Environment;

/// Creates the global frame populated with the standard procedures
pub fn default_env() -> Environment {
    let env = Environment::new();
    register_all(&env);
    debug!(count = env.local_names().len(), "bootstrapped default environment");
    env
}

/// Registers the standard procedures into `env`
pub fn register_all(env: &Environment) {
    arithmetic::register(env);
    comparison::register(env);
    lists::register(env);
}

/// Error for a call with the wrong number of arguments
pub(crate) fn wrong_arity(procedure: &str, expected: &str, got: usize) -> Error {
    Error::primitive(
        procedure,
        format!("expected {} {}, got {}", expected, argument_noun(expected), got),
    )
}

/// Error for an argument of the wrong type
pub(crate) fn wrong_type(procedure: &str, expected: &str, got: &Expression) -> Error {
    Error::primitive(
        procedure,
        format!("expected {}, got {} {}", expected, got.type_name(), got),
    )
}

/// Extracts integers from all arguments
pub(crate) fn numbers(procedure: &str, args: &[Expression]) -> Result<Vec<i64>> {
    args.iter()
        .map(|arg| arg.as_number().ok_or_else(|| wrong_type(procedure, "number", arg)))
        .collect()
}

/// Extracts the elements of a list argument
pub(crate) fn list_arg<'a>(procedure: &str, arg: &'a Expression) -> Result<&'a [Expression]> {
    arg.as_list().ok_or_else(|| wrong_type(procedure, "list", arg))
}
