use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::parser::Expression;

/// A binding frame with an optional link to its outer frame
///
/// Cloning an `Environment` shares the frame: both handles see the same
/// bindings. Frames live on the `gc` heap, so a frame that can only reach
/// itself (a closure bound with `def` in the frame it captured) is reclaimed
/// once no handle, inner frame or live closure refers to it.
#[derive(Clone, Trace, Finalize)]
pub struct Environment {
    frame: Gc<Frame>,
}

#[derive(Trace, Finalize)]
struct Frame {
    /// Variables defined in this frame
    bindings: GcCell<HashMap<String, Expression>>,
    /// Enclosing frame (None for the global frame)
    outer: Option<Environment>,
}

impl Environment {
    /// Creates a new, empty global frame
    pub fn new() -> Self {
        Environment {
            frame: Gc::new(Frame {
                bindings: GcCell::new(HashMap::new()),
                outer: None,
            }),
        }
    }

    /// Creates an empty frame whose outer frame is `self`
    pub fn child(&self) -> Self {
        Environment {
            frame: Gc::new(Frame {
                bindings: GcCell::new(HashMap::new()),
                outer: Some(self.clone()),
            }),
        }
    }

    /// Resolves `name` through this frame and then its outer frames
    pub fn lookup(&self, name: &str) -> Result<Expression> {
        let mut env = self;
        loop {
            if let Some(value) = env.frame.bindings.borrow().get(name) {
                return Ok(value.clone());
            }
            match &env.frame.outer {
                Some(outer) => env = outer,
                None => return Err(Error::unbound(name)),
            }
        }
    }

    /// Binds `name` in this frame only, replacing any previous binding here
    pub fn define(&self, name: impl Into<String>, value: Expression) {
        self.frame.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Registers a host procedure under `name` in this frame
    pub fn define_builtin<F>(&self, name: &str, func: F)
    where
        F: Fn(&[Expression]) -> Result<Expression> + 'static,
    {
        self.define(name, Expression::builtin(name, func));
    }

    /// Checks if `name` resolves anywhere in the chain
    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Names bound directly in this frame, sorted
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frame.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// The enclosing frame, if any
    pub fn outer(&self) -> Option<&Environment> {
        self.frame.outer.as_ref()
    }

    /// Returns true for the top-most frame
    pub fn is_global(&self) -> bool {
        self.frame.outer.is_none()
    }

    /// Number of frames in the chain (1 for the global frame)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self;
        while let Some(outer) = env.outer() {
            depth += 1;
            env = outer;
        }
        depth
    }

    /// Whether both handles refer to the same frame
    pub fn same_frame(&self, other: &Environment) -> bool {
        std::ptr::eq::<Frame>(&*self.frame, &*other.frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}
