use std::iter::Peekable;

use crate::{
    ast::{Definition, Statement},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            primary::starts_definition,
            utils::{expect, parse_name},
        },
    },
};

/// Parses a single top-level statement.
///
/// A statement is either a definition (`name = expr`) or an expression used
/// as a statement. A reserved word followed by `=` is reported as an attempt
/// to redefine it rather than as a stray expression.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Position)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if starts_definition(tokens) || redefines_reserved_word(tokens) {
        return parse_definition(tokens).map(Statement::Definition);
    }

    let line = tokens.peek().map_or(0, |(_, position)| position.line);
    let expr = parse_expression(tokens)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses a `name = expr` binding.
///
/// Used both for top-level definitions and for the bindings of a `let`.
///
/// # Errors
/// Returns [`crate::error::ParseError::ReservedName`] if the name is a reserved word, or
/// any error from parsing the body.
pub fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Definition>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (name, position) = parse_name(tokens)?;
    expect(tokens, &Token::Equals)?;
    let body = parse_expression(tokens)?;

    Ok(Definition { name,
                    body,
                    line: position.line })
}

fn redefines_reserved_word<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut lookahead = tokens.clone();
    matches!((lookahead.next(), lookahead.next()),
             (Some((tok, _)), Some((Token::Equals, _))) if tok.reserved_word().is_some())
}
