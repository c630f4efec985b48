//! Runtime evaluation for minilisp programs

mod environment;
mod evaluator;
mod session;

pub use environment::Environment;
pub use evaluator::{apply, evaluate, SpecialForm};
pub use session::Session;
