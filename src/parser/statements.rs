//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= let_stmt | return_stmt | block | expr_stmt
//! let_stmt  ::= "let" IDENT "=" expression [";"]
//! return_stmt ::= "return" expression [";"]
//! block     ::= "{" statement* "}" [";"]
//! expr_stmt ::= expression [";"]
//! ```
//!
//! Every method starts with the statement's first token in `current` and
//! returns with its last token (the optional `;` included) in `current`.

use crate::parser::ast::*;
use crate::parser::expressions::Precedence;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::LBrace => {
                let block = self.parse_block_statement()?;
                self.skip_optional_semicolon();
                Ok(Statement::Block(block))
            }
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Result<LetStatement, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        };

        self.expect_peek(TokenKind::Assign)?;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        let token = self.current.clone();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(ExpressionStatement { token, expression })
    }

    /// Parse a block starting at `{`; returns with `}` in `current`.
    ///
    /// Errors inside the block are recorded and skipped like top-level ones.
    /// Running out of input before `}` fails the whole block.
    pub(crate) fn parse_block_statement(&mut self) -> Result<BlockStatement, ParseError> {
        self.nested(Self::parse_block_within)
    }

    fn parse_block_within(&mut self) -> Result<BlockStatement, ParseError> {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.advance();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::EndOfInput) {
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedBlock,
                    self.current.location,
                ));
            }
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
        }

        Ok(BlockStatement { token, statements })
    }
}
