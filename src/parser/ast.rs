use gc::{Finalize, Gc, Trace};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Environment;

/// Signature of a host-implemented procedure
///
/// Receives the already evaluated argument values.
pub type PrimitiveFn = dyn Fn(&[Expression]) -> Result<Expression>;

/// Expressions
///
/// The same tree serves as source syntax (built by the reader) and as runtime
/// values (built by the evaluator). Expressions are never mutated in place.
#[derive(Clone, Trace, Finalize)]
pub enum Expression {
    /// Boolean literal, self-evaluating
    Bool(bool),
    /// Integer literal, self-evaluating
    Number(i64),
    /// Identifier, looked up in the environment when evaluated
    Symbol(String),
    /// Unevaluated form, or a data list produced by a primitive
    List(Vec<Expression>),
    /// Host-implemented procedure (never produced by the reader)
    BuiltIn(#[unsafe_ignore_trace] BuiltIn),
    /// Procedure produced by the `fn` special form
    Closure(Closure),
}

/// A procedure implemented by the host, together with its name
///
/// The host function is opaque to the collector: `Gc` handles it captures stay
/// rooted for as long as the procedure exists.
#[derive(Clone)]
pub struct BuiltIn {
    name: Rc<str>,
    func: Rc<PrimitiveFn>,
}

impl BuiltIn {
    /// Wraps a host function under `name`
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Expression]) -> Result<Expression> + 'static,
    {
        BuiltIn {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    /// The name the procedure was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the host function with evaluated arguments
    pub fn call(&self, args: &[Expression]) -> Result<Expression> {
        (self.func)(args)
    }
}

/// A user procedure: parameters, body and the environment active when the
/// `fn` form was evaluated
#[derive(Clone, Trace, Finalize)]
pub struct Closure {
    params: Gc<Expression>,
    body: Gc<Expression>,
    env: Environment,
}

impl Closure {
    /// Creates a closure capturing `env`
    ///
    /// `params` should be a List of Symbols; this is checked when the closure
    /// is called, not here.
    pub fn new(params: Expression, body: Expression, env: Environment) -> Self {
        Closure {
            params: Gc::new(params),
            body: Gc::new(body),
            env,
        }
    }

    /// The parameter list as written in the `fn` form
    pub fn params(&self) -> &Expression {
        &self.params
    }

    /// The body expression
    pub fn body(&self) -> &Expression {
        &self.body
    }

    /// The captured (definition-time) environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Parameter names, or a type error if the parameter list is malformed
    pub fn param_names(&self) -> Result<Vec<&str>> {
        param_names(&self.params)
    }
}

/// Extracts the symbol names of a parameter list
pub(crate) fn param_names(params: &Expression) -> Result<Vec<&str>> {
    let items = match params {
        Expression::List(items) => items,
        other => {
            return Err(Error::type_error(format!(
                "parameters must be a list of symbols, got {}",
                other.type_name()
            )))
        }
    };

    items
        .iter()
        .map(|item| match item {
            Expression::Symbol(name) => Ok(name.as_str()),
            other => Err(Error::type_error(format!(
                "parameter must be a symbol, got {}",
                other
            ))),
        })
        .collect()
}

impl Expression {
    /// Creates a symbol
    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Symbol(name.into())
    }

    /// Creates a list from anything iterable
    pub fn list(items: impl IntoIterator<Item = Expression>) -> Self {
        Expression::List(items.into_iter().collect())
    }

    /// Creates a built-in procedure value
    pub fn builtin<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Expression]) -> Result<Expression> + 'static,
    {
        Expression::BuiltIn(BuiltIn::new(name, func))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Bool(_) => "bool",
            Expression::Number(_) => "number",
            Expression::Symbol(_) => "symbol",
            Expression::List(_) => "list",
            Expression::BuiltIn(_) => "builtin",
            Expression::Closure(_) => "closure",
        }
    }

    /// Everything except `false` counts as true
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Expression::Bool(false))
    }

    /// Returns the integer payload, if any
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Expression::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the symbol name, if any
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the list elements, if any
    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Bool(a), Expression::Bool(b)) => a == b,
            (Expression::Number(a), Expression::Number(b)) => a == b,
            (Expression::Symbol(a), Expression::Symbol(b)) => a == b,
            (Expression::List(a), Expression::List(b)) => a == b,
            (Expression::BuiltIn(a), Expression::BuiltIn(b)) => a.name == b.name,
            (Expression::Closure(a), Expression::Closure(b)) => {
                *a.params == *b.params && *a.body == *b.body && a.env.same_frame(&b.env)
            }
            _ => false,
        }
    }
}

// Closures never print their environment: a frame can reach itself through a
// closure bound with `def`.
impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Expression::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Expression::Symbol(s) => f.debug_tuple("Symbol").field(s).finish(),
            Expression::List(items) => f.debug_tuple("List").field(items).finish(),
            Expression::BuiltIn(builtin) => f.debug_tuple("BuiltIn").field(&builtin.name()).finish(),
            Expression::Closure(closure) => f
                .debug_struct("Closure")
                .field("params", closure.params())
                .field("body", closure.body())
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Bool(b) => write!(f, "{}", b),
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Symbol(s) => write!(f, "{}", s),
            Expression::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Expression::BuiltIn(builtin) => write!(f, "#<builtin {}>", builtin.name()),
            Expression::Closure(closure) => write!(f, "#<closure {}>", closure.params()),
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Expression::Bool(b) => serializer.serialize_bool(*b),
            Expression::Number(n) => serializer.serialize_i64(*n),
            Expression::Symbol(s) => serializer.serialize_str(s),
            Expression::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Expression::BuiltIn(_) | Expression::Closure(_) => serializer.collect_str(self),
        }
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        Expression::Bool(b)
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Self {
        Expression::Number(n)
    }
}
