//! minilisp reader
//!
//! Parses token sequences into [`Expression`] trees by recursive descent.

mod ast;
mod reader;

pub use ast::{BuiltIn, Closure, Expression, PrimitiveFn};
pub(crate) use ast::param_names;
pub use reader::{parse, parse_atom, parse_list, parse_one};
