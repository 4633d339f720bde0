use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub(crate) r#type: TokenType,
    pub(crate) lexeme: String,
    pub(crate) literal: Option<Literal>,
    pub(crate) line: usize,
}

/// Value decoded from a lexeme. Only strings carry one for now.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    String(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    StarStar,

    String,

    EOF,
}

impl TokenType {
    fn name(&self) -> &'static str {
        match self {
            TokenType::LeftParen => "LEFT_PAREN",
            TokenType::RightParen => "RIGHT_PAREN",
            TokenType::LeftBrace => "LEFT_BRACE",
            TokenType::RightBrace => "RIGHT_BRACE",
            TokenType::Comma => "COMMA",
            TokenType::Dot => "DOT",
            TokenType::Minus => "MINUS",
            TokenType::Plus => "PLUS",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::Slash => "SLASH",
            TokenType::Star => "STAR",
            TokenType::Bang => "BANG",
            TokenType::BangEqual => "BANG_EQUAL",
            TokenType::Equal => "EQUAL",
            TokenType::EqualEqual => "EQUAL_EQUAL",
            TokenType::Greater => "GREATER",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::Less => "LESS",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::StarStar => "STAR_STAR",
            TokenType::String => "STRING",
            TokenType::EOF => "EOF",
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s}"),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.r#type, self.lexeme, literal),
            None => write!(f, "{} {} null", self.r#type, self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{Literal, Token, TokenType};

    #[test]
    fn test_display_without_literal() {
        let token = Token {
            r#type: TokenType::BangEqual,
            lexeme: "!=".to_string(),
            literal: None,
            line: 3,
        };
        assert_eq!(token.to_string(), "BANG_EQUAL != null");
    }

    #[test]
    fn test_display_string_literal() {
        let token = Token {
            r#type: TokenType::String,
            lexeme: "\"hi\"".to_string(),
            literal: Some(Literal::String("hi".to_string())),
            line: 1,
        };
        assert_eq!(token.to_string(), "STRING \"hi\" hi");
    }

    #[test]
    fn test_display_eof() {
        let token = Token {
            r#type: TokenType::EOF,
            lexeme: "".to_string(),
            literal: None,
            line: 1,
        };
        // empty lexeme leaves two spaces, same as the book's toString
        assert_eq!(token.to_string(), "EOF  null");
    }
}
