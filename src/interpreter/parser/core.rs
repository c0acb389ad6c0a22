use std::iter::Peekable;

use crate::{
    ast::{Clause, Definition, Program, Term},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token, end_position, tokenize},
        parser::{
            binary::parse_comparison,
            statement::{parse_definition, parse_statement},
            utils::{end_of_input, expect, parse_comma_separated, unexpected},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full source text into a [`Program`].
///
/// Grammar: `program := (statement ","?)*`
///
/// # Errors
/// Returns the first lexical or syntax error. End-of-input errors carry the
/// position just past the last character of `source`.
///
/// # Example
/// ```
/// use sythin::interpreter::parser::core::parse_program;
///
/// let program = parse_program("main = \\f.\\t. f * t").unwrap();
/// assert!(program.definition("main").is_some());
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let tokens = tokenize(source)?;
    let end = end_position(source);

    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();
    while iter.peek().is_some() {
        let statement = parse_statement(&mut iter).map_err(|e| e.at_end_of_input(end.line, end.column))?;
        statements.push(statement);
        if let Some((Token::Comma, _)) = iter.peek() {
            iter.next();
        }
    }

    Ok(Program::new(statements))
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the loosest
/// level, comparison, and descends through the precedence hierarchy.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed term.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_comparison(tokens)
}

/// Parses an `if` expression.
///
/// Syntax:
/// ```text
///     if <condition> then <expr> else <expr> end
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Errors
/// - `UnexpectedToken` if `then`, `else` or `end` is missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Then)?;
    let then_branch = parse_expression(tokens)?;
    expect(tokens, &Token::Else)?;
    let else_branch = parse_expression(tokens)?;
    expect(tokens, &Token::End)?;

    Ok(Term::IfElse { condition: Box::new(condition),
                      then_branch: Box::new(then_branch),
                      else_branch: Box::new(else_branch),
                      line })
}

/// Parses a `case` expression.
///
/// Syntax:
/// ```text
///     case <scrutinee> of <pattern> -> <expr>, ..., _ -> <expr> end
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `case` keyword.
/// - `line`: Line number of the `case` token.
///
/// # Errors
/// Returns a `ParseError` if `of` is missing, a clause is malformed, or the
/// clause list is not closed by `end`.
pub fn parse_case<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let scrutinee = parse_expression(tokens)?;
    expect(tokens, &Token::Of)?;
    let clauses = parse_comma_separated(tokens, parse_clause, &Token::End)?;

    Ok(Term::CaseOf { scrutinee: Box::new(scrutinee),
                      clauses,
                      line })
}

/// Parses one `case` clause.
///
/// Grammar: `clause := (number | "_") "->" expression`
fn parse_clause<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Clause>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (pattern, line) = match tokens.next() {
        Some((Token::Number(n), position)) => (Some(Term::number(*n, position.line)), position.line),
        Some((Token::Underscore, position)) => (None, position.line),
        Some((tok, position)) => return Err(unexpected(tok, *position, "a number or '_'")),
        None => return Err(end_of_input("a number or '_'")),
    };
    expect(tokens, &Token::Arrow)?;
    let result = parse_expression(tokens)?;

    Ok(Clause { pattern, result, line })
}

/// Parses a `let` expression.
///
/// Syntax:
/// ```text
///     let <name> = <expr>, <name> = <expr> in <expr> end
/// ```
///
/// Bindings are kept in source order; the evaluator makes each one visible
/// only to the bindings after it and to the body.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `let` keyword.
/// - `line`: Line number of the `let` token.
///
/// # Errors
/// Returns a `ParseError` if a binding is malformed, `in` is missing, or the
/// body is not closed by `end`.
pub fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Term>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let bindings: Vec<Definition> = parse_comma_separated(tokens, parse_definition, &Token::In)?;
    let body = parse_expression(tokens)?;
    expect(tokens, &Token::End)?;

    Ok(Term::LetIn { bindings,
                     body: Box::new(body),
                     line })
}
