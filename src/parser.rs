pub mod symbols;

use log::{debug, info};

use crate::{
    ast::{BlockStatement, Expression, Identifier, Program, Statement},
    tokeniser::{Token, TokenKind, Tokeniser},
};
use symbols::{INFIX_RULES, PREFIX_RULES, Precedence, precedence_of};

/// A Pratt parser over a [`Tokeniser`].
///
/// The parser keeps one token of lookahead and never aborts: every construct
/// it cannot parse adds a message to [`Parser::errors`] and produces no node.
/// There is no resynchronisation after an error, so one malformed statement
/// can cause follow-on diagnostics. Callers must check the errors before
/// trusting the returned [`Program`].
///
/// Parsing recurses once per level of nesting in the source (parentheses,
/// prefix operators, `if` blocks). Input nested a few thousand levels deep
/// can overflow the thread's stack, so the nesting depth of acceptable input
/// is bounded by the stack size.
pub struct Parser<'a> {
    tokeniser: Tokeniser<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(tokeniser: Tokeniser<'a>) -> Self {
        let mut parser = Self {
            tokeniser,
            current: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
        };

        parser.next_token();
        parser.next_token();

        parser
    }

    /// Diagnostics recorded so far, in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Parse statements until the end of the input.
    pub fn parse_program(&mut self) -> Program<'a> {
        info!("Beginning parse phase");
        let mut program = Program::default();

        while !self.current.is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        info!(
            "Parsed {} statements with {} errors",
            program.statements.len(),
            self.errors.len()
        );
        program
    }

    fn next_token(&mut self) {
        self.current = self.peek;
        self.peek = self.tokeniser.next_token();
    }

    /// Advance if the next token is of `kind`, otherwise record an error.
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek.is(kind) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(kind);
            None
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.expected_error(expected, self.peek.kind);
    }

    fn expected_error(&mut self, expected: TokenKind, found: TokenKind) {
        self.error(format!(
            "expected next token to be {expected}, got {found} instead"
        ));
    }

    fn error(&mut self, message: String) {
        debug!("Parse error: {message}");
        self.errors.push(message);
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    // STATEMENTS

    fn parse_statement(&mut self) -> Option<Statement<'a>> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement<'a>> {
        let token = self.current;

        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier {
            token: self.current,
            name: self.current.literal,
        };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement<'a>> {
        let token = self.current;

        let value = match self.peek.kind {
            TokenKind::Semicolon => {
                self.next_token();
                None
            }
            // Leave the closing brace for the enclosing block.
            TokenKind::RightBrace | TokenKind::Eof => None,
            _ => {
                self.next_token();
                let value = self.parse_expression(Precedence::Lowest)?;
                if self.peek.is(TokenKind::Semicolon) {
                    self.next_token();
                }
                Some(value)
            }
        };

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement<'a>> {
        let token = self.current;
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek.is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Expression { token, expression })
    }

    /// Parse `{ ... }` with the current token on the opening brace.
    fn parse_block_statement(&mut self) -> Option<BlockStatement<'a>> {
        let token = self.current;
        let mut statements = Vec::new();

        self.next_token();
        while !self.current.is(TokenKind::RightBrace) {
            if self.current.is(TokenKind::Eof) {
                self.expected_error(TokenKind::RightBrace, TokenKind::Eof);
                return None;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Some(BlockStatement { token, statements })
    }

    // EXPRESSIONS

    /// Parse an expression whose operators all bind tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression<'a>> {
        let Some(prefix) = PREFIX_RULES.get(&self.current.kind).copied() else {
            let kind = self.current.kind;
            self.error(format!("no prefix parse function for {kind} found"));
            return None;
        };

        let mut left = prefix(self)?;

        while !self.peek.is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = INFIX_RULES.get(&self.peek.kind).copied() else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }
}

// PARSE RULES
//
// Prefix rules start with the current token on the first token of the
// expression; infix rules start on the operator. Both leave the current token
// on the last token they consumed.

fn parse_identifier<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    Some(Expression::Identifier(Identifier {
        token: parser.current,
        name: parser.current.literal,
    }))
}

fn parse_integer<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    let token = parser.current;
    match token.literal.parse::<i64>() {
        Ok(value) => Some(Expression::Integer { token, value }),
        Err(_) => {
            parser.error(format!("could not parse {:?} as integer", token.literal));
            None
        }
    }
}

fn parse_boolean<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    Some(Expression::Boolean {
        token: parser.current,
        value: parser.current.is(TokenKind::True),
    })
}

fn parse_prefix<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    let token = parser.current;

    parser.next_token();
    let right = parser.parse_expression(Precedence::Prefix)?;

    Some(Expression::Prefix {
        token,
        operator: token.literal,
        right: Box::new(right),
    })
}

fn parse_grouped<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    parser.next_token();
    let expression = parser.parse_expression(Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RightParen)?;
    Some(expression)
}

fn parse_if<'a>(parser: &mut Parser<'a>) -> Option<Expression<'a>> {
    let token = parser.current;

    parser.expect_peek(TokenKind::LeftParen)?;
    parser.next_token();
    let condition = parser.parse_expression(Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RightParen)?;

    parser.expect_peek(TokenKind::LeftBrace)?;
    let consequence = parser.parse_block_statement()?;

    let alternative = if parser.peek.is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LeftBrace)?;
        Some(parser.parse_block_statement()?)
    } else {
        None
    };

    Some(Expression::If {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    })
}

fn parse_infix<'a>(parser: &mut Parser<'a>, left: Expression<'a>) -> Option<Expression<'a>> {
    let token = parser.current;
    // Parsing the right side at the operator's own precedence makes chains of
    // equal-precedence operators nest to the left.
    let precedence = parser.current_precedence();

    parser.next_token();
    let right = parser.parse_expression(precedence)?;

    Some(Expression::Infix {
        token,
        left: Box::new(left),
        operator: token.literal,
        right: Box::new(right),
    })
}

/// Parse a program string, returning the tree and any diagnostics.
pub fn parse(program_string: &str) -> (Program<'_>, Vec<String>) {
    let mut parser = Parser::new(Tokeniser::new(program_string));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
