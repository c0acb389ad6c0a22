use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Spanned, Token},
        parser::core::ParseResult,
    },
};

/// Builds an `UnexpectedToken` error for `found` at `at`.
pub(in crate::interpreter::parser) fn unexpected(found: &Token,
                                                 at: Position,
                                                 expected: &str)
                                                 -> ParseError {
    ParseError::UnexpectedToken { found:    found.to_string(),
                                  expected: expected.to_string(),
                                  line:     at.line,
                                  column:   at.column, }
}

/// Builds an `UnexpectedEndOfInput` error.
///
/// The position is filled in by [`crate::interpreter::parser::core::parse_program`].
pub(in crate::interpreter::parser) fn end_of_input(expected: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                       line:     0,
                                       column:   0, }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns a `ParseError` if the next token differs or the input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((tok, position)) if tok == expected => Ok(*position),
        Some((tok, position)) => Err(unexpected(tok, *position, &expected.to_string())),
        None => Err(end_of_input(&expected.to_string())),
    }
}

/// Parses a name being bound: a definition name or a lambda parameter.
///
/// Reserved words are rejected with `ReservedName` rather than a generic
/// unexpected-token error so that `\sin. sin` reports what went wrong.
///
/// # Returns
/// The name and the position it was found at.
pub(in crate::interpreter::parser) fn parse_name<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(name), position)) => Ok((name.clone(), *position)),
        Some((tok, position)) => match tok.reserved_word() {
            Some(word) => Err(ParseError::ReservedName { name:   word.to_string(),
                                                         line:   position.line,
                                                         column: position.column, }),
            None => Err(unexpected(tok, *position, "a name")),
        },
        None => Err(end_of_input("a name")),
    }
}

/// Parses one or more comma-separated items terminated by `closing`.
///
/// The closing token is consumed. Grammar: `list := item ("," item)* closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (`end` or `in`).
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// found between items, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => {
                return Err(unexpected(tok, *position, &format!("',' or {closing}")));
            },
            None => return Err(end_of_input(&closing.to_string())),
        }
    }
    Ok(items)
}
