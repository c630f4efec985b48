use tracing::debug;

use super::ast::Expression;
use crate::error::{Error, Result};
use crate::lexer::tokenize;

/// Parses the first complete form of `source`
///
/// Tokens after the first form are ignored.
pub fn parse(source: &str) -> Result<Expression> {
    let tokens = tokenize(source);
    match parse_one(&tokens) {
        Ok((expr, rest)) => {
            if !rest.is_empty() {
                debug!(ignored = rest.len(), "ignoring tokens after first form");
            }
            Ok(expr)
        }
        Err(err) => {
            debug!(error = %err, "parse failed");
            Err(err)
        }
    }
}

/// Reads one form from the front of `tokens`
///
/// Returns the form and the tokens that follow it.
pub fn parse_one(tokens: &[String]) -> Result<(Expression, &[String])> {
    let (token, rest) = tokens
        .split_first()
        .ok_or_else(|| Error::parse("no input"))?;

    match token.as_str() {
        "(" => parse_list(rest),
        ")" => Err(Error::parse("unexpected )")),
        atom => Ok((parse_atom(atom), rest)),
    }
}

/// Reads list elements up to and including the closing `)`
///
/// `tokens` starts just after the opening `(`.
pub fn parse_list(tokens: &[String]) -> Result<(Expression, &[String])> {
    let mut items = Vec::new();
    let mut rest = tokens;

    loop {
        match rest.split_first() {
            None => return Err(Error::parse("unterminated list")),
            Some((token, after)) if token == ")" => return Ok((Expression::List(items), after)),
            Some(_) => {
                let (item, after) = parse_one(rest)?;
                items.push(item);
                rest = after;
            }
        }
    }
}

/// Classifies a single non-parenthesis token
pub fn parse_atom(token: &str) -> Expression {
    match token {
        "true" => Expression::Bool(true),
        "false" => Expression::Bool(false),
        _ => token
            .parse::<i64>()
            .map(Expression::Number)
            .unwrap_or_else(|_| Expression::symbol(token)),
    }
}
