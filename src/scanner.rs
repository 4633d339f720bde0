use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;
use tracing::{debug, trace};

use crate::token::{Literal, Token, TokenType};

/// public interface for tokenizing
///
/// Always returns a sequence ending in a single `EOF` token. Lexical errors go to `reporter`
/// and scanning carries on with the next character.
pub fn tokenize<R: ErrorReporter + ?Sized>(source: &str, reporter: &mut R) -> Vec<Token> {
    let mut scanner = Scanner::new(source, reporter);
    scanner.scan_tokens();
    scanner.tokens
}

/// Receives every lexical error as soon as it is found. Nothing it does can stop the scan.
pub trait ErrorReporter {
    fn report(&mut self, error: ScanningError);
}

impl<F: FnMut(ScanningError)> ErrorReporter for F {
    fn report(&mut self, error: ScanningError) {
        self(error)
    }
}

/// Collects errors for inspection once the scan is done.
impl ErrorReporter for Vec<ScanningError> {
    fn report(&mut self, error: ScanningError) {
        self.push(error)
    }
}

struct Scanner<'a, R: ErrorReporter + ?Sized> {
    source: &'a str,
    char_iter: Peekable<Chars<'a>>,
    tokens: Vec<Token>,
    error_reporter: &'a mut R,

    // byte offset of the start of lexeme
    current_lexeme_start: usize,
    current: usize,
    line: usize,
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ScanningError {
    #[error("Unexpected Character.")]
    UnexpectedCharacter { line: usize, character: char },
    #[error("Unterminated string.")]
    UnterminatedString { line: usize, string_start: String },
    #[error("Unterminated block comment.")]
    UnterminatedBlockComment { line: usize, comment_start: String },
}

impl ScanningError {
    pub fn line(&self) -> usize {
        match self {
            ScanningError::UnexpectedCharacter { line, .. }
            | ScanningError::UnterminatedString { line, .. }
            | ScanningError::UnterminatedBlockComment { line, .. } => *line,
        }
    }
}

impl<'a, R: ErrorReporter + ?Sized> Scanner<'a, R> {
    fn new(source: &'a str, error_reporter: &'a mut R) -> Scanner<'a, R> {
        Scanner {
            source,
            char_iter: source.chars().peekable(),
            tokens: vec![],
            error_reporter,
            current_lexeme_start: 0,
            current: 0,
            line: 1,
        }
    }

    fn scan_tokens(&mut self) {
        debug!(bytes = self.source.len(), "scanning source");
        while !self.is_at_end() {
            if let Err(scanning_error) = self.scan_token() {
                debug!(line = scanning_error.line(), "{scanning_error}");
                self.error_reporter.report(scanning_error);
            }
        }
        self.tokens.push(Token {
            r#type: TokenType::EOF,
            lexeme: "".to_string(),
            literal: None,
            line: self.line,
        });
        debug!(
            tokens = self.tokens.len(),
            lines = self.line,
            "finished scanning"
        );
    }

    fn scan_token(&mut self) -> Result<(), ScanningError> {
        // set start of lexeme
        self.current_lexeme_start = self.current;
        let Some(c) = self.advance() else {
            return Ok(());
        };
        let maybe_token_type = match c {
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '{' => Some(TokenType::LeftBrace),
            '}' => Some(TokenType::RightBrace),
            ',' => Some(TokenType::Comma),
            '.' => Some(TokenType::Dot),
            '-' => Some(TokenType::Minus),
            '+' => Some(TokenType::Plus),
            ';' => Some(TokenType::Semicolon),
            '*' => match self.match_one('*') {
                true => Some(TokenType::StarStar),
                false => Some(TokenType::Star),
            },
            '!' => match self.match_one('=') {
                true => Some(TokenType::BangEqual),
                false => Some(TokenType::Bang),
            },
            '=' => match self.match_one('=') {
                true => Some(TokenType::EqualEqual),
                false => Some(TokenType::Equal),
            },
            '<' => match self.match_one('=') {
                true => Some(TokenType::LessEqual),
                false => Some(TokenType::Less),
            },
            '>' => match self.match_one('=') {
                true => Some(TokenType::GreaterEqual),
                false => Some(TokenType::Greater),
            },
            '/' => {
                if self.match_one('/') {
                    // the newline is left for the main loop so it bumps the line counter
                    while self.peek_one().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                    None
                } else if self.match_one('*') {
                    self.consume_block_comment()?;
                    None
                } else {
                    Some(TokenType::Slash)
                }
            }
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }
            '"' => {
                let value = self.consume_string()?;
                self.add_token(TokenType::String, Some(Literal::String(value)));
                return Ok(());
            }
            _ => {
                return Err(ScanningError::UnexpectedCharacter {
                    line: self.line,
                    character: c,
                });
            }
        };

        if let Some(token_type) = maybe_token_type {
            self.add_token(token_type, None);
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consumes the next character only if it is `expected`.
    fn match_one(&mut self, expected: char) -> bool {
        if self.peek_one() != Some(expected) {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) -> Option<char> {
        let current_char = self.char_iter.next()?;
        self.current += current_char.len_utf8();
        Some(current_char)
    }

    fn add_token(&mut self, token_type: TokenType, literal: Option<Literal>) {
        // current only ever moves by whole characters, so both ends are char boundaries.
        let text = self.source[self.current_lexeme_start..self.current].to_string();
        let token = Token {
            r#type: token_type,
            lexeme: text,
            literal,
            line: self.line,
        };
        trace!(line = token.line, "{token}");
        self.tokens.push(token);
    }

    /// like advance but does not consume the character. 1 lookahead.
    fn peek_one(&mut self) -> Option<char> {
        self.char_iter.peek().copied()
    }

    /// 2 lookahead, only needed to spot the end of a block comment.
    fn peek_two(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    /// Reads up to and including the closing quote, returns the text between the quotes.
    fn consume_string(&mut self) -> Result<String, ScanningError> {
        while let Some(c) = self.peek_one() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.peek_one().is_none() {
            return Err(ScanningError::UnterminatedString {
                line: self.line,
                string_start: self.source[self.current_lexeme_start..self.current].to_string(),
            });
        }

        // consume closing quote
        self.advance();

        // both quotes are one byte wide
        Ok(self.source[self.current_lexeme_start + 1..self.current - 1].to_string())
    }

    /// Called after the opening `/*`. No nesting: the first `*/` closes the comment.
    fn consume_block_comment(&mut self) -> Result<(), ScanningError> {
        loop {
            match self.peek_one() {
                None => {
                    return Err(ScanningError::UnterminatedBlockComment {
                        line: self.line,
                        comment_start: self.source[self.current_lexeme_start..self.current]
                            .to_string(),
                    });
                }
                Some('*') if self.peek_two() == Some('/') => {
                    // consume '*' and '/'
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}
