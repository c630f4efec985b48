//! # minilisp - a small embeddable S-expression interpreter
//!
//! A minimal Lisp dialect for embedding as a scripting or config-expression
//! evaluator, or for teaching. Source text is read into an [`Expression`] tree
//! and evaluated against a chain of lexical [`Environment`] frames.
//!
//! ## Quick Start
//!
//! ```rust
//! use minilisp::{default_env, parse_eval, Expression};
//!
//! # fn main() -> minilisp::Result<()> {
//! let env = default_env();
//!
//! assert_eq!(parse_eval("(+ 1 2)", &env)?, Expression::Number(3));
//!
//! // Bindings persist in the environment across calls
//! parse_eval("(def square (fn (x) (* x x)))", &env)?;
//! assert_eq!(parse_eval("(square 7)", &env)?, Expression::Number(49));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language
//!
//! ```text
//! expr := atom | "(" expr* ")"
//! atom := "true" | "false" | integer | symbol
//! ```
//!
//! Whitespace and parentheses are the only delimiters. There are no comments,
//! strings, floats or quoting.
//!
//! ### Special forms
//!
//! - `(if cond then else?)` - only `false` is false; a missing else gives `false`
//! - `(def name expr)` - binds in the current frame and returns `name`
//! - `(fn (params...) body)` - a closure over the environment where it is evaluated
//!
//! ### Built-ins
//!
//! - **Arithmetic**: `(+ 1 2 3)`, `(- 10 3)`, `(* 2 3)`, `(/ 10 2)` (integers, checked)
//! - **Comparison**: `(= x y)`, `(< x y)`, `(> x y)`, `(<= x y)`, `(>= x y)`, `(not x)`
//! - **Lists**: `(list 1 2)`, `(cons 0 xs)`, `(first xs)`, `(rest xs)`, `(empty? xs)`, `(length xs)`
//!
//! ## Architecture
//!
//! ```text
//! Source Code → tokenize → Tokens → parse_one → Expression → evaluate → Result
//! ```
//!
//! - [`tokenize`] - splits source into parenthesis and atom tokens
//! - [`parse`] - reads the first complete form
//! - [`evaluate`] - walks an expression against an environment
//! - [`default_env`] - the global frame with the built-in procedures
//! - [`Session`] - a global environment plus `eval` for hosts and REPLs
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]; the first error aborts the enclosing
//! evaluation and previously established bindings are left intact.
//!
//! ```rust
//! # use minilisp::{default_env, parse_eval, Error};
//! let env = default_env();
//! match parse_eval("(/ 10 0)", &env) {
//!     Err(Error::PrimitiveError { procedure, .. }) => assert_eq!(procedure, "/"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Limits
//!
//! Evaluation is ordinary recursion with no depth guard and no tail-call
//! elimination. Deeply nested input or unbounded recursion in a program
//! exhausts the host stack, which aborts the process rather than returning an
//! error.
//!
//! Environment frames and closures live on the thread-local `gc` heap and are
//! single-threaded. A closure bound with `def` in the frame it captured forms
//! a cycle with that frame; the cycle is reclaimed by the collector once
//! nothing outside it is reachable, whether it is a finished call frame or a
//! dropped global environment. Collection runs as allocation grows, or on
//! demand with `gc::force_collect`.

pub mod builtins;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use builtins::default_env;
pub use error::{Error, Result};
pub use lexer::tokenize;
pub use parser::{parse, BuiltIn, Closure, Expression};
pub use runtime::{apply, evaluate, Environment, Session};

/// Version of the minilisp interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses the first form of `source` and evaluates it against `env`
///
/// Tokens after the first complete form are ignored. A parse error is
/// returned before any evaluation happens.
pub fn parse_eval(source: &str, env: &Environment) -> Result<Expression> {
    let expr = parse(source)?;
    evaluate(&expr, env)
}
