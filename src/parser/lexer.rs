//! Lexer (tokenizer) for minicalc source code
//!
//! Converts raw source text into [`Token`]s, either lazily through
//! [`Lexer::next_token`] or all at once through [`Lexer::tokenize`]. Once the
//! input is exhausted the lexer keeps producing [`TokenKind::Eof`].
//!
//! Integer literals and identifiers are ASCII only; any other character,
//! including non-ASCII letters and digits, is a [`LexError`].

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Integer(i64),

    // Identifiers
    Identifier(String),

    // Keywords
    Var,

    // Operators
    Plus,  // +
    Minus, // -
    Mul,   // *
    Div,   // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    Assign,    // =
    Semicolon, // ;

    // End of file
    Eof,
}

impl TokenKind {
    /// Upper-case kind name used in diagnostics and token dumps.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Integer(_) => "INTEGER",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Var => "VAR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::Var => write!(f, "var"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Mul => write!(f, "*"),
            TokenKind::Div => write!(f, "/"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Eof => write!(f, "None"),
        }
    }
}

/// A token together with the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {})", self.kind.name(), self.kind)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid character: '{ch}' at {location}")]
    UnexpectedCharacter { ch: char, location: SourceLocation },

    #[error("Integer literal {literal} out of range at {location}")]
    IntegerOutOfRange {
        literal: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. } => location,
            LexError::IntegerOutOfRange { location, .. } => location,
        }
    }
}

/// Lexer for minicalc source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with exactly one
    /// `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token, skipping any whitespace before it.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, loc)),
        };

        let kind = match ch {
            '0'..='9' => return self.integer(ch, loc),
            'a'..='z' | 'A'..='Z' => return Ok(self.identifier_or_keyword(ch, loc)),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '=' => TokenKind::Assign,
            ';' => TokenKind::Semicolon,
            _ => return Err(LexError::UnexpectedCharacter { ch, location: loc }),
        };

        Ok(Token::new(kind, loc))
    }

    /// Scan a maximal run of decimal digits
    fn integer(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str
            .parse::<i64>()
            .map_err(|_| LexError::IntegerOutOfRange {
                literal: num_str.clone(),
                location: loc,
            })?;

        Ok(Token::new(TokenKind::Integer(value), loc))
    }

    /// Scan identifier or the `var` keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match ident.as_str() {
            "var" => TokenKind::Var,
            _ => TokenKind::Identifier(ident),
        };

        Token::new(kind, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("var x = (3 + 4) * 2 - y / 1;");

        assert_eq!(
            tokens,
            vec![
                TokenKind::Var,
                TokenKind::Identifier("x".to_string()),
                TokenKind::Assign,
                TokenKind::LParen,
                TokenKind::Integer(3),
                TokenKind::Plus,
                TokenKind::Integer(4),
                TokenKind::RParen,
                TokenKind::Mul,
                TokenKind::Integer(2),
                TokenKind::Minus,
                TokenKind::Identifier("y".to_string()),
                TokenKind::Div,
                TokenKind::Integer(1),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = kinds("var variable var2");
        assert_eq!(tokens[0], TokenKind::Var);
        assert_eq!(tokens[1], TokenKind::Identifier("variable".to_string()));
        assert_eq!(tokens[2], TokenKind::Identifier("var2".to_string()));
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = kinds("12ab");
        assert_eq!(tokens[0], TokenKind::Integer(12));
        assert_eq!(tokens[1], TokenKind::Identifier("ab".to_string()));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(kinds("007")[0], TokenKind::Integer(7));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  x ");
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(ref s) if s == "x"));
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("var x\n  = 5;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_invalid_character() {
        let err = Lexer::new("var x = 3 # 2;").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                ch: '#',
                location: SourceLocation::new(1, 11),
            }
        );
        assert!(err.to_string().contains("'#'"));
    }

    #[test]
    fn test_underscore_is_invalid() {
        let err = Lexer::new("my_var").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { ch: '_', .. }));
    }

    #[test]
    fn test_non_ascii_digit_is_invalid() {
        let err = Lexer::new("var x = \u{663};").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                ch: '\u{663}',
                location: SourceLocation::new(1, 9),
            }
        );
    }

    #[test]
    fn test_non_ascii_ends_identifier() {
        let mut lexer = Lexer::new("a\u{663}");
        assert_eq!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier("a".to_string())
        );
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::UnexpectedCharacter { ch: '\u{663}', .. })
        ));

        let err = Lexer::new("caf\u{e9} = 1;").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { ch: '\u{e9}', .. }));
    }

    #[test]
    fn test_integer_at_i64_limit() {
        assert_eq!(kinds("9223372036854775807")[0], TokenKind::Integer(i64::MAX));
        assert!(Lexer::new("9223372036854775808").tokenize().is_err());
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = Lexer::new("99999999999999999999").tokenize().unwrap_err();
        assert!(matches!(err, LexError::IntegerOutOfRange { ref literal, .. } if literal == "99999999999999999999"));
    }

    #[test]
    fn test_token_display() {
        let tokens = Lexer::new("var a = 1").tokenize().unwrap();
        assert_eq!(tokens[0].to_string(), "Token(VAR, var)");
        assert_eq!(tokens[1].to_string(), "Token(IDENTIFIER, a)");
        assert_eq!(tokens[2].to_string(), "Token(ASSIGN, =)");
        assert_eq!(tokens[3].to_string(), "Token(INTEGER, 1)");
        assert_eq!(tokens[4].to_string(), "Token(EOF, None)");
    }
}
