use std::{fmt, ops::Range};

use logos::Logos;

use crate::{
    ast::{BinaryOperator, Builtin, UnaryOperator},
    error::LexError,
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Unsigned numeric literal tokens, such as `3`, `3.`, `.5`, `2.5e-3`.
    /// A leading sign is folded in by [`Lexer`].
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// A number whose exponent has no digits, e.g. `3e` or `.5E+`.
    /// [`Lexer`] reports it as [`LexError::MalformedNumber`], unless a bare
    /// `e` runs into a word as in `2end`, which is read as `2` then `end`.
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?")]
    #[regex(r"\.[0-9]+[eE][+-]?")]
    MalformedNumber,
    /// Reserved builtin names such as `sin` or `plus`.
    #[token("sin", |_| Builtin::Unary(UnaryOperator::Sin))]
    #[token("cos", |_| Builtin::Unary(UnaryOperator::Cos))]
    #[token("exp", |_| Builtin::Unary(UnaryOperator::Exp))]
    #[token("inv", |_| Builtin::Unary(UnaryOperator::Inv))]
    #[token("abs", |_| Builtin::Unary(UnaryOperator::Abs))]
    #[token("floor", |_| Builtin::Unary(UnaryOperator::Floor))]
    #[token("round", |_| Builtin::Unary(UnaryOperator::Round))]
    #[token("ceil", |_| Builtin::Unary(UnaryOperator::Ceil))]
    #[token("sqrt", |_| Builtin::Unary(UnaryOperator::Sqrt))]
    #[token("plus", |_| Builtin::Binary(BinaryOperator::Plus))]
    #[token("minus", |_| Builtin::Binary(BinaryOperator::Minus))]
    #[token("mult", |_| Builtin::Binary(BinaryOperator::Mult))]
    #[token("divide", |_| Builtin::Binary(BinaryOperator::Divide))]
    #[token("eq", |_| Builtin::Binary(BinaryOperator::Eq))]
    #[token("neq", |_| Builtin::Binary(BinaryOperator::Neq))]
    #[token("lt", |_| Builtin::Binary(BinaryOperator::Lt))]
    #[token("lteq", |_| Builtin::Binary(BinaryOperator::LtEq))]
    #[token("gt", |_| Builtin::Binary(BinaryOperator::Gt))]
    #[token("gteq", |_| Builtin::Binary(BinaryOperator::GtEq))]
    #[token("mod", |_| Builtin::Binary(BinaryOperator::Mod))]
    #[token("pow", |_| Builtin::Binary(BinaryOperator::Pow))]
    Builtin(Builtin),
    /// `case`
    #[token("case")]
    Case,
    /// `of`
    #[token("of")]
    Of,
    /// `end`
    #[token("end")]
    End,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `let`
    #[token("let")]
    Let,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens such as `main`, `f` or `osc_2`.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=/=`
    #[token("=/=")]
    NotEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `=<`
    #[token("=<")]
    LessEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `_`
    #[token("_")]
    Underscore,
    /// `->`
    #[token("->")]
    Arrow,
    /// Line breaks; counted, never emitted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns `true` if a `+`/`-` directly after this token is an infix
    /// operator rather than the sign of a number.
    #[must_use]
    pub const fn ends_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Identifier(_) | Self::RParen | Self::End)
    }

    /// The source text of a reserved word token, `None` for anything else.
    #[must_use]
    pub const fn reserved_word(&self) -> Option<&'static str> {
        match self {
            Self::Builtin(b) => Some(b.name()),
            Self::Case => Some("case"),
            Self::Of => Some("of"),
            Self::End => Some("end"),
            Self::If => Some("if"),
            Self::Then => Some("then"),
            Self::Else => Some("else"),
            Self::Let => Some("let"),
            Self::In => Some("in"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::MalformedNumber => f.write_str("malformed number"),
            Self::Builtin(b) => write!(f, "'{b}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Case => f.write_str("'case'"),
            Self::Of => f.write_str("'of'"),
            Self::End => f.write_str("'end'"),
            Self::If => f.write_str("'if'"),
            Self::Then => f.write_str("'then'"),
            Self::Else => f.write_str("'else'"),
            Self::Let => f.write_str("'let'"),
            Self::In => f.write_str("'in'"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Equals => f.write_str("'='"),
            Self::EqualEqual => f.write_str("'=='"),
            Self::NotEqual => f.write_str("'=/='"),
            Self::Greater => f.write_str("'>'"),
            Self::GreaterEqual => f.write_str("'>='"),
            Self::Less => f.write_str("'<'"),
            Self::LessEqual => f.write_str("'=<'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Backslash => f.write_str("'\\'"),
            Self::Dot => f.write_str("'.'"),
            Self::Comma => f.write_str("','"),
            Self::Underscore => f.write_str("'_'"),
            Self::Arrow => f.write_str("'->'"),
            Self::Comment | Self::NewLine | Self::Ignored => f.write_str("whitespace"),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts so that every token can be
/// given a line and column.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token together with the position of its first character.
pub type Spanned = (Token, Position);

type RawToken = Result<(Token, Range<usize>, Position), LexError>;

/// Stateful cursor over the source text producing positioned tokens.
///
/// Wraps the generated logos lexer and adds what it cannot express on its
/// own: column tracking, folding a `+`/`-` into the number that immediately
/// follows it when no operand precedes the sign, and splitting `\x.5` into a
/// lambda dot and the number `5`.
pub struct Lexer<'s> {
    inner:                 logos::Lexer<'s, Token>,
    pending:               Vec<RawToken>,
    previous_ends_operand: bool,
    previous_backslash:    bool,
    lambda_parameter:      bool,
}

impl<'s> Lexer<'s> {
    /// Creates a lexer positioned at line 1, column 1 of `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { inner:                 Token::lexer_with_extras(source,
                                                               LexerExtras { line:       1,
                                                                             line_start: 0, }),
               pending:               Vec::new(),
               previous_ends_operand: false,
               previous_backslash:    false,
               lambda_parameter:      false, }
    }

    /// Returns the next token, `None` at end of input.
    ///
    /// # Errors
    /// Returns a [`LexError`] for characters that start no token and for
    /// numbers with an empty exponent.
    pub fn next_token(&mut self) -> Option<Result<Spanned, LexError>> {
        let (token, span, position) = match self.raw_next()? {
            Ok(raw) => raw,
            Err(e) => return Some(Err(e)),
        };

        let token = match token {
            Token::Plus | Token::Minus if !self.previous_ends_operand => {
                self.fold_sign(token, &span)
            },
            Token::Number(_) if self.lambda_parameter && self.inner.source()[span.clone()].starts_with('.') => {
                self.split_lambda_dot(&span, position)
            },
            other => other,
        };

        self.lambda_parameter = self.previous_backslash && matches!(token, Token::Identifier(_));
        self.previous_backslash = token == Token::Backslash;
        self.previous_ends_operand = token.ends_operand();
        Some(Ok((token, position)))
    }

    /// Emits the dot of `\x.5` and queues the number after it.
    fn split_lambda_dot(&mut self, span: &Range<usize>, position: Position) -> Token {
        let rest = span.start + 1..span.end;
        let value = accumulate_number(&self.inner.source()[rest.clone()]);
        self.pending.push(Ok((Token::Number(value),
                              rest,
                              Position { line:   position.line,
                                         column: position.column + 1, })));
        Token::Dot
    }

    /// Turns `-` followed directly by a number into a negative number.
    fn fold_sign(&mut self, sign: Token, span: &Range<usize>) -> Token {
        match self.raw_next() {
            Some(Ok((Token::Number(value), next_span, _))) if next_span.start == span.end => {
                if sign == Token::Minus {
                    Token::Number(-value)
                } else {
                    Token::Number(value)
                }
            },
            lookahead => {
                self.pending.extend(lookahead);
                sign
            },
        }
    }

    /// Reads `3else` as the number `3` followed by the word `else`.
    ///
    /// Applies only when the literal ends in a bare `e`/`E` that runs straight
    /// into more word characters. The word is queued as the next token.
    fn split_exponent_word(&mut self, span: &Range<usize>, position: Position) -> Option<RawToken> {
        let source = self.inner.source();
        let marker = span.end - 1;
        if !source[marker..span.end].eq_ignore_ascii_case("e") {
            return None;
        }

        let rest = &source[span.end..];
        let word_len = rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                           .unwrap_or(rest.len());
        if word_len == 0 {
            return None;
        }

        let word = marker..span.end + word_len;
        let token = Token::lexer(&source[word.clone()]).next()?.ok()?;
        self.inner.bump(word_len);
        self.pending.push(Ok((token,
                              word,
                              Position { line:   position.line,
                                         column: position.column + (marker - span.start), })));

        let number = span.start..marker;
        Some(Ok((Token::Number(accumulate_number(&source[number.clone()])), number, position)))
    }

    fn raw_next(&mut self) -> Option<RawToken> {
        if let Some(pending) = self.pending.pop() {
            return Some(pending);
        }

        let token = self.inner.next()?;
        let span = self.inner.span();
        let position = Position { line:   self.inner.extras.line,
                                  column: span.start - self.inner.extras.line_start + 1, };

        Some(match token {
            Ok(Token::MalformedNumber) => match self.split_exponent_word(&span, position) {
                Some(number) => number,
                None => Err(LexError::MalformedNumber { text:   self.inner.slice().to_string(),
                                                        line:   position.line,
                                                        column: position.column, }),
            },
            Ok(token) => Ok((token, span, position)),
            Err(()) => {
                let character = self.inner.slice().chars().next().unwrap_or('\0');
                Err(LexError::UnexpectedCharacter { character,
                                                    line: position.line,
                                                    column: position.column })
            },
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Lexes the whole source text.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
///
/// # Example
/// ```
/// use sythin::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x = -3.5e2").unwrap();
/// assert_eq!(tokens[2].0, Token::Number(-350.0));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(source).collect()
}

/// Position just past the last character of `source`.
#[must_use]
pub fn end_position(source: &str) -> Position {
    let line = 1 + source.matches('\n').count();
    let line_start = source.rfind('\n').map_or(0, |i| i + 1);
    Position { line,
               column: source.len() - line_start + 1 }
}

fn parse_number(lex: &mut logos::Lexer<Token>) -> f64 {
    accumulate_number(lex.slice())
}

/// Computes the value of an unsigned numeric literal.
///
/// The integer part is accumulated by multiply-and-add, the fraction by
/// divide-and-add, and the exponent scales the whole mantissa. Characters
/// outside the literal grammar end the scan.
///
/// # Example
/// ```
/// use sythin::interpreter::lexer::accumulate_number;
///
/// assert_eq!(accumulate_number("42"), 42.0);
/// assert_eq!(accumulate_number(".5"), 0.5);
/// assert!((accumulate_number("3.5e2") - 350.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn accumulate_number(text: &str) -> f64 {
    let mut chars = text.chars().peekable();

    let mut mantissa = 0.0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        mantissa = mantissa * 10.0 + f64::from(digit);
        chars.next();
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let mut scale = 10.0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            mantissa += f64::from(digit) / scale;
            scale *= 10.0;
            chars.next();
        }
    }

    if matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        let sign = match chars.peek() {
            Some('-') => {
                chars.next();
                -1.0
            },
            Some('+') => {
                chars.next();
                1.0
            },
            _ => 1.0,
        };
        let mut exponent = 0.0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            exponent = exponent * 10.0 + f64::from(digit);
            chars.next();
        }
        mantissa *= 10f64.powf(sign * exponent);
    }

    mantissa
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn numeric_literal_forms() {
        assert_eq!(kinds("12"), vec![Token::Number(12.0)]);
        assert_eq!(kinds("12."), vec![Token::Number(12.0)]);
        assert_eq!(kinds(".25"), vec![Token::Number(0.25)]);
        assert_eq!(kinds("+7"), vec![Token::Number(7.0)]);
        assert_eq!(kinds("1E3"), vec![Token::Number(1000.0)]);
    }

    #[test]
    fn signed_numbers_round_trip() {
        for (text, expected) in [("-3.5e2", -350.0),
                                 ("+0.125", 0.125),
                                 ("-.5e-1", -0.05),
                                 ("6.02e+23", 6.02e23),
                                 ("-42.", -42.0)]
        {
            match kinds(text).as_slice() {
                [Token::Number(n)] => {
                    assert!((n - expected).abs() <= expected.abs() * 1e-12,
                            "{text} lexed to {n}, expected {expected}");
                },
                other => panic!("{text} lexed to {other:?}"),
            }
        }
    }

    #[test]
    fn minus_after_operand_is_infix() {
        assert_eq!(kinds("x -1"),
                   vec![Token::Identifier("x".into()), Token::Minus, Token::Number(1.0)]);
        assert_eq!(kinds("(2)-1"),
                   vec![Token::LParen,
                        Token::Number(2.0),
                        Token::RParen,
                        Token::Minus,
                        Token::Number(1.0)]);
        assert_eq!(kinds("3 * -1"),
                   vec![Token::Number(3.0), Token::Star, Token::Number(-1.0)]);
        assert_eq!(kinds("- 1"), vec![Token::Minus, Token::Number(1.0)]);
    }

    #[test]
    fn punctuation_is_matched_greedily() {
        assert_eq!(kinds("== =/= >= =< -> = > <"),
                   vec![Token::EqualEqual,
                        Token::NotEqual,
                        Token::GreaterEqual,
                        Token::LessEqual,
                        Token::Arrow,
                        Token::Equals,
                        Token::Greater,
                        Token::Less]);
        assert_eq!(kinds("_ -> 0"), vec![Token::Underscore, Token::Arrow, Token::Number(0.0)]);
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        assert_eq!(kinds("sin sine case cases"),
                   vec![Token::Builtin(Builtin::Unary(UnaryOperator::Sin)),
                        Token::Identifier("sine".into()),
                        Token::Case,
                        Token::Identifier("cases".into())]);
        assert_eq!(kinds("gteq"), vec![Token::Builtin(Builtin::Binary(BinaryOperator::GtEq))]);
    }

    #[test]
    fn comments_and_positions() {
        let tokens = tokenize("# header\nmain = \\f.\\t. f  # trailing\n  t").unwrap();
        assert_eq!(tokens[0], (Token::Identifier("main".into()), Position { line: 2, column: 1 }));
        assert_eq!(tokens[1].1, Position { line: 2, column: 6 });
        let last = tokens.last().unwrap();
        assert_eq!(*last, (Token::Identifier("t".into()), Position { line: 3, column: 3 }));
    }

    #[test]
    fn unrecognized_character_fails_with_position() {
        let err = tokenize("main = 1\n  $").unwrap_err();
        assert_eq!(err,
                   LexError::UnexpectedCharacter { character: '$',
                                                   line:      2,
                                                   column:    3, });
        assert_eq!(err.to_string(), "<string>:2:3: unrecognized character '$'");
    }

    #[test]
    fn empty_exponent_is_malformed() {
        let err = tokenize("x = 3e").unwrap_err();
        assert!(matches!(err, LexError::MalformedNumber { line: 1, column: 5, .. }));
        assert!(matches!(tokenize("x = 3e+ 1"), Err(LexError::MalformedNumber { .. })));
        assert!(matches!(tokenize("x = 3e x"), Err(LexError::MalformedNumber { .. })));
    }

    #[test]
    fn bare_exponent_marker_before_word_splits() {
        assert_eq!(kinds("then 3else"), vec![Token::Then, Token::Number(3.0), Token::Else]);
        assert_eq!(kinds("2end"), vec![Token::Number(2.0), Token::End]);
        assert_eq!(kinds("-1.5exp"),
                   vec![Token::Number(-1.5), Token::Builtin(Builtin::Unary(UnaryOperator::Exp))]);
        assert_eq!(kinds("4e_x"), vec![Token::Number(4.0), Token::Identifier("e_x".into())]);

        let tokens = tokenize("a 12else").unwrap();
        assert_eq!(tokens[2].1, Position { line: 1, column: 5 });
    }

    #[test]
    fn lambda_dot_before_fraction_is_split() {
        assert_eq!(kinds("\\x.5"),
                   vec![Token::Backslash,
                        Token::Identifier("x".into()),
                        Token::Dot,
                        Token::Number(5.0)]);
        assert_eq!(kinds("x .5"), vec![Token::Identifier("x".into()), Token::Number(0.5)]);
    }

    #[test]
    fn end_position_points_past_last_character() {
        assert_eq!(end_position("ab\ncd"), Position { line: 2, column: 3 });
        assert_eq!(end_position(""), Position { line: 1, column: 1 });
    }
}
