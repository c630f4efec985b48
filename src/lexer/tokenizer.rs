use tracing::trace;

/// Splits S-expression source text into a flat sequence of tokens
///
/// Parentheses are padded with a single space on both sides, then the text is
/// split on whitespace and empty fragments are discarded. Every input yields a
/// (possibly empty) token sequence; there is no failure mode.
pub fn tokenize(source: &str) -> Vec<String> {
    let tokens: Vec<String> = source
        .replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect();

    trace!(count = tokens.len(), "tokenized source");
    tokens
}
