use crate::frontend::token::Token;
use crate::utils::config::parser::keyword;
use crate::utils::errors::{SqlError, SqlResult};
use crate::LineNumber;
use std::{iter::Peekable, str::Chars};

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    state: &'a mut LineNumber,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, state: &'a mut LineNumber) -> Self {
        Self {
            chars: source.chars().peekable(),
            state,
        }
    }

    pub fn scan(mut self) -> SqlResult<Vec<(Token, usize)>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            if self.chars.peek().is_none() {
                break;
            }
            let line = self.state.line;
            tokens.push((self.scan_token()?, line));
        }
        tokens.push((Token::Eof, self.state.line));
        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) -> SqlResult<()> {
        loop {
            match self.chars.peek() {
                Some(&'-') => {
                    if !self.scan_comment() {
                        break;
                    }
                }
                Some(&ch) if ch.is_whitespace() => self.scan_whitespace(),
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> SqlResult<Token> {
        match self.chars.peek() {
            Some(&ch) if ch.is_alphabetic() || ch == '_' => Ok(self.scan_identifier()),
            Some(&ch) if ch.is_ascii_digit() => self.scan_number(),
            Some(&'\'') => self.scan_string_literal(),
            Some(&'"') => self.scan_quoted_identifier(),
            Some(&ch) => self.scan_single_char_token(ch),
            None => Ok(Token::Eof),
        }
    }

    // Returns false when the '-' does not start a "--" comment.
    fn scan_comment(&mut self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        if lookahead.peek() != Some(&'-') {
            return false;
        }
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            self.chars.next();
        }
        true
    }

    fn scan_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                if ch == '\n' {
                    self.state.line += 1;
                }
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        keyword(&identifier).unwrap_or(Token::Ident(identifier))
    }

    fn scan_number(&mut self) -> SqlResult<Token> {
        let mut number_str = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        number_str
            .parse::<i64>()
            .map(Token::Number)
            .map_err(|_| SqlError::InvalidNumber {
                number: number_str,
                line: self.state.line,
            })
    }

    // Quote doubling ('') escapes a quote inside the literal.
    fn scan_delimited(&mut self, quote: char) -> SqlResult<String> {
        let start_line = self.state.line;
        self.chars.next(); // Consume opening quote
        let mut literal = String::new();
        loop {
            match self.chars.next() {
                Some(ch) if ch == quote => {
                    if self.chars.peek() == Some(&quote) {
                        self.chars.next();
                        literal.push(quote);
                    } else {
                        return Ok(literal);
                    }
                }
                Some(ch) => {
                    if ch == '\n' {
                        self.state.line += 1;
                    }
                    literal.push(ch);
                }
                None => return Err(SqlError::UnterminatedString { line: start_line }),
            }
        }
    }

    fn scan_string_literal(&mut self) -> SqlResult<Token> {
        self.scan_delimited('\'').map(Token::StringLiteral)
    }

    fn scan_quoted_identifier(&mut self) -> SqlResult<Token> {
        let name = self.scan_delimited('"')?;
        if name.is_empty() {
            return Err(SqlError::lexer_error(
                "zero-length delimited identifier",
                self.state.line,
            ));
        }
        Ok(Token::Ident(name))
    }

    fn scan_single_char_token(&mut self, ch: char) -> SqlResult<Token> {
        self.chars.next(); // Consume the character
        let token = match ch {
            '=' => Token::Equal,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                return Err(SqlError::UnknownToken {
                    token: ch,
                    line: self.state.line,
                })
            }
        };
        Ok(token)
    }
}

// Convenience function mirroring the parser entry point
pub fn scan(state: &mut LineNumber, source: &str) -> SqlResult<Vec<(Token, usize)>> {
    Lexer::new(source, state).scan()
}
