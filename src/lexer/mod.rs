//! Lexical analysis for minilisp
//!
//! Converts source text into a flat sequence of token strings.

mod tokenizer;

pub use tokenizer::tokenize;
