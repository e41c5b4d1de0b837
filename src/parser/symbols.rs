use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{
    Parser, parse_boolean, parse_grouped, parse_identifier, parse_if, parse_infix,
    parse_integer, parse_prefix,
};
use crate::{ast::Expression, tokeniser::TokenKind};

/// Binding strength of an operator, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    Lowest,
    /// `==` and `!=`
    Equals,
    /// `<` and `>`
    LessGreater,
    /// `+` and `-`
    Sum,
    /// `*`, `/` and `%`
    Product,
    /// Unary `-` and `!`
    Prefix,
    /// Reserved for call expressions; nothing maps to it yet.
    Call,
}

/// Parses an expression that starts at the current token.
pub type PrefixParseFn = for<'a> fn(&mut Parser<'a>) -> Option<Expression<'a>>;
/// Parses the rest of an expression whose left operand is already built.
pub type InfixParseFn = for<'a> fn(&mut Parser<'a>, Expression<'a>) -> Option<Expression<'a>>;

lazy_static! {
    /// Precedence of every infix operator. Kinds not listed are `Lowest`.
    pub static ref PRECEDENCES: HashMap<TokenKind, Precedence> = HashMap::from([
        (TokenKind::Equal, Precedence::Equals),
        (TokenKind::NotEqual, Precedence::Equals),
        (TokenKind::LessThan, Precedence::LessGreater),
        (TokenKind::GreaterThan, Precedence::LessGreater),
        (TokenKind::Plus, Precedence::Sum),
        (TokenKind::Minus, Precedence::Sum),
        (TokenKind::Asterisk, Precedence::Product),
        (TokenKind::Slash, Precedence::Product),
        (TokenKind::Percent, Precedence::Product),
    ]);

    /// The prefix parse rule for each token kind that can open an expression.
    pub static ref PREFIX_RULES: HashMap<TokenKind, PrefixParseFn> = HashMap::from([
        (TokenKind::Identifier, parse_identifier as PrefixParseFn),
        (TokenKind::Integer, parse_integer as PrefixParseFn),
        (TokenKind::True, parse_boolean as PrefixParseFn),
        (TokenKind::False, parse_boolean as PrefixParseFn),
        (TokenKind::Bang, parse_prefix as PrefixParseFn),
        (TokenKind::Minus, parse_prefix as PrefixParseFn),
        (TokenKind::LeftParen, parse_grouped as PrefixParseFn),
        (TokenKind::If, parse_if as PrefixParseFn),
    ]);

    /// The infix parse rule for each binary operator.
    pub static ref INFIX_RULES: HashMap<TokenKind, InfixParseFn> = HashMap::from([
        (TokenKind::Plus, parse_infix as InfixParseFn),
        (TokenKind::Minus, parse_infix as InfixParseFn),
        (TokenKind::Asterisk, parse_infix as InfixParseFn),
        (TokenKind::Slash, parse_infix as InfixParseFn),
        (TokenKind::Percent, parse_infix as InfixParseFn),
        (TokenKind::Equal, parse_infix as InfixParseFn),
        (TokenKind::NotEqual, parse_infix as InfixParseFn),
        (TokenKind::LessThan, parse_infix as InfixParseFn),
        (TokenKind::GreaterThan, parse_infix as InfixParseFn),
    ]);
}

/// The precedence of `kind` when it appears as an infix operator.
pub fn precedence_of(kind: TokenKind) -> Precedence {
    PRECEDENCES.get(&kind).copied().unwrap_or(Precedence::Lowest)
}
