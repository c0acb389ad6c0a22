use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Builtin, Term},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{core::ParseResult, primary::parse_application},
    },
};

/// Parses comparison expressions.
///
/// Handles left-associative comparison operators:
/// `==`, `=/=`, `>`, `>=`, `<`, `=<`.
///
/// The rule is: `comparison := additive (("==" | "=/=" | ">" | ">=" | "<" |
/// "=<") additive)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// Nested applications of the comparison builtins.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_additive(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && is_comparison_op(op)
        {
            tokens.next();
            let right = parse_additive(tokens)?;
            left = lower_binary(op, left, right, position.line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// Nested applications of `plus` and `minus`.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Plus | BinaryOperator::Minus)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = lower_binary(op, left, right, position.line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := application (("*" | "/") application)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_application(tokens)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mult | BinaryOperator::Divide)
        {
            tokens.next();
            let right = parse_application(tokens)?;
            left = lower_binary(op, left, right, position.line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Rewrites `left op right` as `(op left) right`.
///
/// The left operand is applied first, so evaluation order matches the source
/// order of the operands.
#[must_use]
pub fn lower_binary(op: BinaryOperator, left: Term, right: Term, line: usize) -> Term {
    let function = Term::builtin(Builtin::Binary(op), line);
    Term::apply(Term::apply(function, left, line), right, line)
}

/// Maps an infix operator token to the binary builtin it stands for.
///
/// Returns `None` for all other tokens, including the builtin names
/// themselves, which are only ever used in prefix position.
///
/// # Example
/// ```
/// use sythin::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::LessEqual),
///            Some(BinaryOperator::LtEq));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Plus),
        Token::Minus => Some(BinaryOperator::Minus),
        Token::Star => Some(BinaryOperator::Mult),
        Token::Slash => Some(BinaryOperator::Divide),
        Token::EqualEqual => Some(BinaryOperator::Eq),
        Token::NotEqual => Some(BinaryOperator::Neq),
        Token::Greater => Some(BinaryOperator::Gt),
        Token::GreaterEqual => Some(BinaryOperator::GtEq),
        Token::Less => Some(BinaryOperator::Lt),
        Token::LessEqual => Some(BinaryOperator::LtEq),
        _ => None,
    }
}

const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Eq
             | BinaryOperator::Neq
             | BinaryOperator::Gt
             | BinaryOperator::GtEq
             | BinaryOperator::Lt
             | BinaryOperator::LtEq)
}
