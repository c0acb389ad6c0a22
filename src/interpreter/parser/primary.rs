use std::iter::Peekable;

use crate::{
    ast::Term,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_case, parse_expression, parse_if, parse_let},
            utils::{end_of_input, expect, parse_name, unexpected},
        },
    },
};

/// Parses application by juxtaposition.
///
/// Application is left-associative, so `f a b` parses as `(f a) b`. The
/// argument list stops at the first token that cannot start an atom, and
/// before an identifier followed by `=`, which begins the next top-level
/// definition.
///
/// Grammar:
/// ```text
///     application := atom atom*
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the function expression.
///
/// # Returns
/// The atom itself, or nested [`Term::Application`] nodes.
pub(crate) fn parse_application<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut function = parse_atom(tokens)?;
    while let Some((token, position)) = tokens.peek() {
        let line = position.line;
        if !starts_atom(token) || starts_definition(tokens) {
            break;
        }
        let argument = parse_atom(tokens)?;
        function = Term::apply(function, argument, line);
    }
    Ok(function)
}

/// Parses an atomic expression.
///
/// Grammar (simplified):
/// ```text
///     atom := number
///           | identifier
///           | builtin
///           | "(" expression ")"
///           | "\" name "." expression
///           | case_expression
///           | if_expression
///           | let_expression
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an atom.
///
/// # Returns
/// The parsed [`Term`] or a `ParseError` on failure.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (token, position) = tokens.next().ok_or_else(|| end_of_input("an expression"))?;
    let line = position.line;

    match token {
        Token::Number(n) => Ok(Term::number(*n, line)),
        Token::Identifier(name) => Ok(Term::Identifier { name: name.clone(),
                                                         line }),
        Token::Builtin(builtin) => Ok(Term::builtin(*builtin, line)),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Token::Backslash => parse_lambda(tokens, line),
        Token::Case => parse_case(tokens, line),
        Token::If => parse_if(tokens, line),
        Token::Let => parse_let(tokens, line),
        tok => Err(unexpected(tok, *position, "an expression")),
    }
}

/// Parses the rest of a lambda after its backslash.
///
/// The body extends as far right as possible, so `\x. x + 1` is
/// `\x. (x + 1)`.
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (parameter, _) = parse_name(tokens)?;
    expect(tokens, &Token::Dot)?;
    let body = parse_expression(tokens)?;
    Ok(Term::lambda(parameter, body, line))
}

/// Returns `true` if `token` can begin an atom.
const fn starts_atom(token: &Token) -> bool {
    matches!(token,
             Token::Number(_)
             | Token::Identifier(_)
             | Token::Builtin(_)
             | Token::LParen
             | Token::Backslash
             | Token::Case
             | Token::If
             | Token::Let)
}

/// Returns `true` if the next two tokens are `identifier =`.
///
/// Looks ahead on a clone of the iterator, leaving `tokens` untouched.
pub(crate) fn starts_definition<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut lookahead = tokens.clone();
    matches!((lookahead.next(), lookahead.next()),
             (Some((Token::Identifier(_), _)), Some((Token::Equals, _))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> Term {
        let tokens = tokenize(source).unwrap();
        parse_application(&mut tokens.iter().peekable()).unwrap()
    }

    fn ident(name: &str) -> Term {
        Term::Identifier { name: name.into(),
                           line: 1 }
    }

    #[test]
    fn juxtaposition_is_left_associative() {
        assert_eq!(parse("f a b"),
                   Term::apply(Term::apply(ident("f"), ident("a"), 1), ident("b"), 1));
    }

    #[test]
    fn application_stops_before_definition() {
        let tokens = tokenize("f a\ng = 1").unwrap();
        let mut iter = tokens.iter().peekable();
        assert_eq!(parse_application(&mut iter).unwrap(), Term::apply(ident("f"), ident("a"), 1));
        assert!(starts_definition(&iter));
    }

    #[test]
    fn parenthesized_argument() {
        assert_eq!(parse("f (g x)"),
                   Term::apply(ident("f"), Term::apply(ident("g"), ident("x"), 1), 1));
    }

    #[test]
    fn lambda_dot_fraction_body() {
        let term = parse("\\x.5");
        assert_eq!(term.as_lambda(), Some(("x", &Term::number(5.0, 1))));
    }
}
