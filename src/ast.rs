use std::{collections::HashMap, fmt};

/// Builtin operators that take a single numeric operand.
///
/// `Inv` is arithmetic negation, not reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `exp`
    Exp,
    /// `inv`
    Inv,
    /// `abs`
    Abs,
    /// `floor`
    Floor,
    /// `round`
    Round,
    /// `ceil`
    Ceil,
    /// `sqrt`
    Sqrt,
}

/// Builtin operators that take two curried numeric operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `plus`, infix `+`
    Plus,
    /// `minus`, infix `-`
    Minus,
    /// `mult`, infix `*`
    Mult,
    /// `divide`, infix `/`
    Divide,
    /// `eq`, infix `==`
    Eq,
    /// `neq`, infix `=/=`
    Neq,
    /// `lt`, infix `<`
    Lt,
    /// `lteq`, infix `=<`
    LtEq,
    /// `gt`, infix `>`
    Gt,
    /// `gteq`, infix `>=`
    GtEq,
    /// `mod`
    Mod,
    /// `pow`
    Pow,
}

/// A builtin primitive as it appears in source, before any application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// A one-argument builtin.
    Unary(UnaryOperator),
    /// A two-argument builtin, applied one operand at a time.
    Binary(BinaryOperator),
}

impl UnaryOperator {
    /// The reserved word naming this builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Inv => "inv",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Round => "round",
            Self::Ceil => "ceil",
            Self::Sqrt => "sqrt",
        }
    }
}

impl BinaryOperator {
    /// The reserved word naming this builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Mult => "mult",
            Self::Divide => "divide",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::LtEq => "lteq",
            Self::Gt => "gt",
            Self::GtEq => "gteq",
            Self::Mod => "mod",
            Self::Pow => "pow",
        }
    }
}

impl Builtin {
    /// The reserved word naming this builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unary(op) => op.name(),
            Self::Binary(op) => op.name(),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value embedded directly in the syntax tree.
///
/// These are owned by the tree and outlive every evaluation call; the
/// evaluator turns them into runtime values without copying the bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric constant.
    Number(f64),
    /// A one-parameter lambda, `\parameter. body`.
    Lambda {
        /// Name bound to the argument when the lambda is applied.
        parameter: String,
        /// The lambda body.
        body:      Box<Term>,
    },
    /// A builtin primitive such as `sin` or `plus`.
    Builtin(Builtin),
}

/// One clause of a `case ... of ... end` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The value to match, or `None` for the `_` wildcard.
    pub pattern: Option<Term>,
    /// The expression selected when the pattern matches.
    pub result:  Term,
    /// Line number of the clause in the source code.
    pub line:    usize,
}

/// A `name = body` binding, either at top level or inside a `let`.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// The bound name.
    pub name: String,
    /// The bound expression.
    pub body: Term,
    /// Line number in the source code.
    pub line: usize,
}

/// A node of the immutable syntax tree.
///
/// Multi-argument calls are nested `Application`s and infix operators are
/// lowered to applications of the matching binary builtin, so the evaluator
/// only ever sees single-argument application.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// An embedded literal (number, lambda or builtin).
    Literal {
        /// The embedded value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// A name, resolved at evaluation time.
    Identifier {
        /// The referenced name.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Single-argument application by juxtaposition.
    Application {
        /// The applied expression.
        function: Box<Self>,
        /// The argument expression.
        argument: Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `case scrutinee of p1 -> r1, ..., _ -> rn end`
    CaseOf {
        /// The expression being matched.
        scrutinee: Box<Self>,
        /// The clauses, tried in order.
        clauses:   Vec<Clause>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `if condition then a else b end`
    IfElse {
        /// The tested expression; zero selects the else branch.
        condition:   Box<Self>,
        /// Expression evaluated for a non-zero condition.
        then_branch: Box<Self>,
        /// Expression evaluated for a zero condition.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `let a = x, b = y in body end`, sequential and non-recursive.
    LetIn {
        /// The bindings, in source order.
        bindings: Vec<Definition>,
        /// The expression evaluated with every binding in scope.
        body:     Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Term {
    /// Builds a numeric literal.
    #[must_use]
    pub const fn number(value: f64, line: usize) -> Self {
        Self::Literal { value: LiteralValue::Number(value),
                        line }
    }

    /// Builds a lambda literal `\parameter. body`.
    #[must_use]
    pub fn lambda(parameter: String, body: Self, line: usize) -> Self {
        Self::Literal { value: LiteralValue::Lambda { parameter,
                                                      body: Box::new(body) },
                        line }
    }

    /// Builds a builtin literal.
    #[must_use]
    pub const fn builtin(builtin: Builtin, line: usize) -> Self {
        Self::Literal { value: LiteralValue::Builtin(builtin),
                        line }
    }

    /// Builds a single-argument application.
    #[must_use]
    pub fn apply(function: Self, argument: Self, line: usize) -> Self {
        Self::Application { function: Box::new(function),
                            argument: Box::new(argument),
                            line }
    }

    /// Line number of the node in the source code.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Application { line, .. }
            | Self::CaseOf { line, .. }
            | Self::IfElse { line, .. }
            | Self::LetIn { line, .. } => *line,
        }
    }

    /// Returns the parameter and body if this term is a lambda literal.
    #[must_use]
    pub fn as_lambda(&self) -> Option<(&str, &Self)> {
        match self {
            Self::Literal { value: LiteralValue::Lambda { parameter, body },
                            .. } => Some((parameter.as_str(), body.as_ref())),
            _ => None,
        }
    }
}

/// One top-level item of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = expr`
    Definition(Definition),
    /// A bare expression. It is never evaluated and only draws a warning.
    Expression {
        /// The expression.
        expr: Term,
        /// Line number in the source code.
        line: usize,
    },
}

/// The root of a parsed source text.
///
/// A program is immutable once built and can be shared between threads; all
/// per-evaluation state lives in the evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
    index:      HashMap<String, usize>,
}

impl Program {
    /// Builds a program and indexes the first definition of every name.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut index = HashMap::new();
        for (position, statement) in statements.iter().enumerate() {
            if let Statement::Definition(def) = statement {
                index.entry(def.name.clone()).or_insert(position);
            }
        }
        Self { statements, index }
    }

    /// All top-level items in source order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// All top-level definitions in source order, duplicates included.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.statements.iter().filter_map(|statement| match statement {
                                  Statement::Definition(def) => Some(def),
                                  Statement::Expression { .. } => None,
                              })
    }

    /// Looks up the first top-level definition called `name`.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        match self.index.get(name).map(|&i| &self.statements[i]) {
            Some(Statement::Definition(def)) => Some(def),
            _ => None,
        }
    }
}
