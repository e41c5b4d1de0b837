pub mod symbols;

use log::trace;

pub use symbols::{Token, TokenKind, lookup_identifier};

/// Reads tokens out of a borrowed source string, one byte at a time.
///
/// The tokeniser never fails: bytes it does not recognise come out as
/// [`TokenKind::Illegal`] tokens and are reported later by the parser.
/// Once the input is exhausted every call returns an end-of-input token.
#[derive(Debug, Clone)]
pub struct Tokeniser<'a> {
    input: &'a str,
    /// Index of `current` in the input.
    position: usize,
    /// Index of the byte after `current`.
    read_position: usize,
    /// The byte under examination, or 0 past the end of the input.
    current: u8,
}

impl<'a> Tokeniser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut tokeniser = Self {
            input,
            position: 0,
            read_position: 0,
            current: 0,
        };
        tokeniser.read_char();
        tokeniser
    }

    /// Produce the next token in the input.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        if self.at_end() {
            return Token::eof();
        }

        let start = self.position;
        let kind = match self.current {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'<' => TokenKind::LessThan,
            b'>' => TokenKind::GreaterThan,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            byte if is_letter(byte) => return self.read_identifier(),
            byte if byte.is_ascii_digit() => return self.read_integer(),
            _ => {
                // Keep the literal on a char boundary when the byte opens a
                // multi-byte character.
                let width = self.input[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                for _ in 1..width {
                    self.read_char();
                }
                TokenKind::Illegal
            }
        };

        self.read_char();
        let token = Token::new(kind, &self.input[start..self.position]);
        trace!("Tokenised {token}");
        token
    }

    fn read_char(&mut self) {
        self.current = self
            .input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0);
        self.position = self.read_position.min(self.input.len());
        self.read_position = self.position + 1;
    }

    fn peek_char(&self) -> u8 {
        self.input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> Token<'a> {
        let start = self.position;
        while is_letter(self.current) {
            self.read_char();
        }
        let literal = &self.input[start..self.position];
        let token = Token::new(lookup_identifier(literal), literal);
        trace!("Tokenised {token}");
        token
    }

    fn read_integer(&mut self) -> Token<'a> {
        let start = self.position;
        while self.current.is_ascii_digit() {
            self.read_char();
        }
        let token = Token::new(TokenKind::Integer, &self.input[start..self.position]);
        trace!("Tokenised {token}");
        token
    }
}

/// Yields every token before the end of the input.
impl<'a> Iterator for Tokeniser<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Tokenise a program string.
pub fn tokenise(program_string: &str) -> Vec<Token<'_>> {
    Tokeniser::new(program_string).collect()
}
