use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Deepest parenthesis nesting accepted in one expression
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, got {} at {location}", .found.name())]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        location: SourceLocation,
    },

    #[error("Invalid factor: unexpected {} at {location}", .found.name())]
    InvalidFactor {
        found: TokenKind,
        location: SourceLocation,
    },

    #[error("Parentheses nested deeper than {limit} levels at {location}")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. } => location,
            ParseError::InvalidFactor { location, .. } => location,
            ParseError::NestingTooDeep { location, .. } => location,
            ParseError::Lex(err) => err.location(),
        }
    }
}

/// Recursive descent parser for minicalc
///
/// Grammar, lowest precedence first:
///
/// ```text
/// program   := statement*
/// statement := 'var' IDENTIFIER '=' expr ';'
///            | IDENTIFIER '=' expr ';'
/// expr      := term (('+' | '-') term)*
/// term      := factor (('*' | '/') factor)*
/// factor    := INTEGER | IDENTIFIER | '(' expr ')'
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize, // Open parentheses around the current factor
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Build a parser over an already scanned token stream. A missing
    /// trailing `Eof` is supplied.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let loc = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, loc));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (a sequence of statements up to `Eof`)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let stmt = self.parse_statement()?;
            program.statements.push(stmt);
        }

        debug!(
            statements = program.statements.len(),
            operators = program.operator_count(),
            "parsed program"
        );
        Ok(program)
    }

    /// Parse a `var` declaration or a plain assignment
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.match_token(&TokenKind::Var) {
            let (name, location) = self.expect_identifier()?;
            self.expect_token(&TokenKind::Assign)?;
            let init = self.parse_expr()?;
            self.expect_token(&TokenKind::Semicolon)?;
            return Ok(Statement::VarDecl {
                name,
                init,
                location,
            });
        }

        let (target, location) = self.expect_identifier()?;
        self.expect_token(&TokenKind::Assign)?;
        let expr = self.parse_expr()?;
        self.expect_token(&TokenKind::Semicolon)?;
        Ok(Statement::Assignment {
            target,
            expr,
            location,
        })
    }

    /// Parse additive (+ -)
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&TokenKind::Plus) {
                BinOp::Add
            } else if self.match_token(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_term()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&TokenKind::Mul) {
                BinOp::Mul
            } else if self.match_token(&TokenKind::Div) {
                BinOp::Div
            } else {
                break;
            };

            let right = Box::new(self.parse_factor()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse factor (literals, variables, parenthesized expressions)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        match self.peek().kind.clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::Number(n, loc))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::Variable(name, loc))
            }
            TokenKind::LParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                        location: loc,
                    });
                }
                self.advance();

                self.depth += 1;
                let expr = self.parse_expr();
                self.depth -= 1;

                let expr = expr?;
                self.expect_token(&TokenKind::RParen)?;
                Ok(expr)
            }
            found => Err(ParseError::InvalidFactor {
                found,
                location: loc,
            }),
        }
    }

    // ===== Helper methods =====

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.peek().kind.clone(),
            location: self.current_location(),
        }
    }

    fn expect_token(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        let loc = self.current_location();
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok((name, loc))
        } else {
            Err(self.unexpected("IDENTIFIER"))
        }
    }
}
