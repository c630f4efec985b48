use tracing::debug;

use crate::builtins::default_env;
use crate::error::Result;
use crate::parser::Expression;
use crate::runtime::Environment;

/// An evaluation session owning one global environment
///
/// Bindings made with `def` at top level persist across calls to
/// [`Session::eval`]. A failed evaluation never removes or alters existing
/// global bindings. Separate sessions share nothing.
#[derive(Debug)]
pub struct Session {
    env: Environment,
}

impl Session {
    /// Creates a session over the default environment
    pub fn new() -> Self {
        Session { env: default_env() }
    }

    /// Creates a session over a caller-supplied global environment
    pub fn with_env(env: Environment) -> Self {
        Session { env }
    }

    /// Parses and evaluates one unit of source text
    pub fn eval(&mut self, source: &str) -> Result<Expression> {
        let result = crate::parse_eval(source, &self.env);
        match &result {
            Ok(value) => debug!(kind = value.type_name(), "evaluated"),
            Err(err) => debug!(kind = err.kind(), error = %err, "evaluation failed"),
        }
        result
    }

    /// The session's global environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Drops every user binding by starting over from the default environment
    ///
    /// The old global frame and everything only it reaches, closures bound in
    /// it included, are reclaimed by the next collection.
    pub fn reset(&mut self) {
        self.env = default_env();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
