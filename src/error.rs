//! Error types for the minilisp interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Every parse and evaluation operation returns one of these as a value. The
/// first error raised while evaluating a sub-form short-circuits the whole
/// enclosing evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// Malformed source text
    ///
    /// **Triggered by:** empty input, a stray `)`, or a list that is never closed
    /// **Example:** `(+ 1 2` (missing closing parenthesis)
    #[error("Parse error: {0}")]
    ParseError(String),

    // Runtime errors
    /// Symbol lookup exhausted the environment chain
    ///
    /// **Triggered by:** evaluating a symbol that was never bound
    /// **Example:** `y` (when y was never defined)
    /// **Prevention:** bind names with `(def y value)` before use
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// Wrong number of argument forms or values
    ///
    /// **Triggered by:** a special form or closure call with the wrong count
    /// **Example:** `(fn (a) a b)`, `((fn (a) a) 1 2)`
    #[error("Arity error: {form} expects {expected} {}, got {got}", argument_noun(.expected))]
    ArityError {
        /// Special form or callable that rejected the call
        form: String,
        /// Accepted argument count(s)
        expected: String,
        /// Number actually supplied
        got: usize,
    },

    /// A form of the wrong shape, or a call to a non-callable value
    ///
    /// **Triggered by:** `(def 1 2)`, `(fn (1) 1)`, `()`, `(1 2)`
    #[error("Type error: {0}")]
    TypeError(String),

    /// A built-in procedure rejected its arguments
    ///
    /// **Triggered by:** division by zero, overflow, or arguments of the wrong type
    /// **Example:** `(/ 10 0)`, `(+ 1 true)`
    #[error("Primitive error: {procedure}: {reason}")]
    PrimitiveError {
        /// Name of the built-in procedure
        procedure: String,
        /// Failure reason
        reason: String,
    },
}

impl Error {
    /// Create a parse error with a reason
    pub fn parse(reason: impl Into<String>) -> Self {
        Error::ParseError(reason.into())
    }

    /// Create an unbound-symbol error
    pub fn unbound(name: impl Into<String>) -> Self {
        Error::UnboundSymbol { name: name.into() }
    }

    /// Create an arity error
    pub fn arity(form: impl Into<String>, expected: impl Into<String>, got: usize) -> Self {
        Error::ArityError {
            form: form.into(),
            expected: expected.into(),
            got,
        }
    }

    /// Create a type error with a message
    pub fn type_error(msg: impl Into<String>) -> Self {
        Error::TypeError(msg.into())
    }

    /// Create an error raised by the built-in `procedure`
    pub fn primitive(procedure: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PrimitiveError {
            procedure: procedure.into(),
            reason: reason.into(),
        }
    }

    /// Short tag naming the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ParseError(_) => "parse",
            Error::UnboundSymbol { .. } => "unbound",
            Error::ArityError { .. } => "arity",
            Error::TypeError(_) => "type",
            Error::PrimitiveError { .. } => "primitive",
        }
    }
}

/// "argument" or "arguments" to follow an expected count such as "1" or "2 or 3"
pub(crate) fn argument_noun(expected: &str) -> &'static str {
    if expected == "1" || expected.ends_with(" 1") {
        "argument"
    } else {
        "arguments"
    }
}

/// Result type for minilisp operations
pub type Result<T> = std::result::Result<T, Error>;
