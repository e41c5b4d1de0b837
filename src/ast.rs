use std::fmt::{Display, Formatter, Result};

use crate::tokeniser::Token;

// AST NODES

/// A boxed Expression to allow recursive type structure.
pub type BoxExpr<'a> = Box<Expression<'a>>;

/// The root of every parse: the top-level statements in source order.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Program<'a> {
    pub statements: Vec<Statement<'a>>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Statement<'a> {
    /// `let <name> = <value>;`
    Let {
        token: Token<'a>,
        name: Identifier<'a>,
        value: Expression<'a>,
    },
    /// `return <value>;`, the value being optional.
    Return {
        token: Token<'a>,
        value: Option<Expression<'a>>,
    },
    /// A bare expression used as a statement.
    Expression {
        token: Token<'a>,
        expression: Expression<'a>,
    },
    /// A braced sequence of statements in statement position.
    Block(BlockStatement<'a>),
}

/// A braced sequence of statements, used as the body of `if` and `else`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BlockStatement<'a> {
    pub token: Token<'a>,
    pub statements: Vec<Statement<'a>>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier<'a> {
    pub token: Token<'a>,
    pub name: &'a str,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    Integer {
        token: Token<'a>,
        value: i64,
    },
    Boolean {
        token: Token<'a>,
        value: bool,
    },
    Prefix {
        token: Token<'a>,
        operator: &'a str,
        right: BoxExpr<'a>,
    },
    Infix {
        token: Token<'a>,
        left: BoxExpr<'a>,
        operator: &'a str,
        right: BoxExpr<'a>,
    },
    If {
        token: Token<'a>,
        condition: BoxExpr<'a>,
        consequence: BlockStatement<'a>,
        alternative: Option<BlockStatement<'a>>,
    },
}

impl<'a> Expression<'a> {
    /// The token the expression was parsed from.
    pub fn token(&self) -> Token<'a> {
        match self {
            Self::Identifier(ident) => ident.token,
            Self::Integer { token, .. }
            | Self::Boolean { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::If { token, .. } => *token,
        }
    }
}

impl<'a> Statement<'a> {
    /// The token the statement was parsed from.
    pub fn token(&self) -> Token<'a> {
        match self {
            Self::Let { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. } => *token,
            Self::Block(block) => block.token,
        }
    }
}

// RENDERING
//
// Every node prints in a canonical form with each prefix and infix
// expression parenthesised, so `1 + 2 * 3` renders as `(1 + (2 * 3))`.

impl Display for Program<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Let { token, name, value } => {
                write!(f, "{} {name} = {value};", token.literal)
            }
            Self::Return { token, value } => match value {
                Some(value) => write!(f, "{} {value};", token.literal),
                None => write!(f, "{};", token.literal),
            },
            Self::Expression { expression, .. } => write!(f, "{expression}"),
            Self::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for BlockStatement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{{ ")?;
        for statement in &self.statements {
            write!(f, "{statement} ")?;
        }
        write!(f, "}}")
    }
}

impl Display for Identifier<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Expression<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Integer { value, .. } => write!(f, "{value}"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Prefix {
                operator, right, ..
            } => write!(f, "({operator}{right})"),
            Self::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Self::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
        }
    }
}
