//! Expression parsing implementation
//!
//! Expressions are parsed by precedence climbing (Pratt parsing). Two fixed
//! tables drive the engine:
//!
//! - [`prefix_rule`]: which rule starts an expression at a given token kind
//!   (identifiers, integers, grouping, unary operators, function literals)
//! - [`infix_rule`]: which rule continues an expression at a given token kind,
//!   and how tightly it binds (binary operators, calls)
//!
//! # Precedence
//!
//! ```text
//! Lowest < LessGreater (< >) < Sum (+ -) < Product (* /) < Prefix (-x !x) < Call (f(x))
//! ```
//!
//! Binary operators parse their right operand at their own precedence, so a
//! following operator of equal strength folds into the left-hand side:
//! `a - b - c` is `((a - b) - c)`.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

/// Binding strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// Comparisons: `<`, `>`
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

/// Rules that begin an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    Identifier,
    Integer,
    Grouped,
    Unary(PrefixOperator),
    Function,
}

/// Rules that extend an already parsed left-hand expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixRule {
    Binary(InfixOperator),
    Call,
}

/// Prefix rule table
pub fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    match kind {
        TokenKind::Identifier => Some(PrefixRule::Identifier),
        TokenKind::Integer => Some(PrefixRule::Integer),
        TokenKind::LParen => Some(PrefixRule::Grouped),
        TokenKind::Minus => Some(PrefixRule::Unary(PrefixOperator::Negate)),
        TokenKind::Bang => Some(PrefixRule::Unary(PrefixOperator::Not)),
        TokenKind::Function => Some(PrefixRule::Function),
        TokenKind::Illegal
        | TokenKind::EndOfInput
        | TokenKind::Assign
        | TokenKind::Plus
        | TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::RParen
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::Let
        | TokenKind::Return => None,
    }
}

/// Infix rule table with binding precedence
pub fn infix_rule(kind: TokenKind) -> Option<(InfixRule, Precedence)> {
    use InfixOperator as Op;

    match kind {
        TokenKind::LessThan => Some((InfixRule::Binary(Op::LessThan), Precedence::LessGreater)),
        TokenKind::GreaterThan => {
            Some((InfixRule::Binary(Op::GreaterThan), Precedence::LessGreater))
        }
        TokenKind::Plus => Some((InfixRule::Binary(Op::Plus), Precedence::Sum)),
        TokenKind::Minus => Some((InfixRule::Binary(Op::Minus), Precedence::Sum)),
        TokenKind::Asterisk => Some((InfixRule::Binary(Op::Multiply), Precedence::Product)),
        TokenKind::Slash => Some((InfixRule::Binary(Op::Divide), Precedence::Product)),
        TokenKind::LParen => Some((InfixRule::Call, Precedence::Call)),
        TokenKind::Illegal
        | TokenKind::EndOfInput
        | TokenKind::Identifier
        | TokenKind::Integer
        | TokenKind::Assign
        | TokenKind::Bang
        | TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::RParen
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::Function
        | TokenKind::Let
        | TokenKind::Return => None,
    }
}

impl Parser {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    ///
    /// Starts with the expression's first token in `current` and returns with
    /// its last token in `current`.
    pub(crate) fn parse_expression(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        self.nested(|parser| parser.parse_expression_within(precedence))
    }

    fn parse_expression_within(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        let rule = prefix_rule(self.current.kind).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::NoPrefixParseFn(self.current.kind),
                self.current.location,
            )
        })?;

        let mut left = self.apply_prefix_rule(rule)?;

        while let Some((rule, rule_precedence)) = infix_rule(self.peek.kind) {
            if rule_precedence <= precedence {
                break;
            }
            self.advance();
            left = self.apply_infix_rule(rule, rule_precedence, left)?;
        }

        Ok(left)
    }

    fn apply_prefix_rule(&mut self, rule: PrefixRule) -> Result<Expression, ParseError> {
        match rule {
            PrefixRule::Identifier => Ok(Expression::Identifier(self.parse_identifier())),
            PrefixRule::Integer => self.parse_integer_literal().map(Expression::Integer),
            PrefixRule::Grouped => self.parse_grouped_expression(),
            PrefixRule::Unary(operator) => self
                .parse_prefix_expression(operator)
                .map(Expression::Prefix),
            PrefixRule::Function => self.parse_function_literal().map(Expression::Function),
        }
    }

    fn apply_infix_rule(
        &mut self,
        rule: InfixRule,
        precedence: Precedence,
        left: Expression,
    ) -> Result<Expression, ParseError> {
        match rule {
            InfixRule::Binary(operator) => self
                .parse_infix_expression(operator, precedence, left)
                .map(Expression::Infix),
            InfixRule::Call => self.parse_call_expression(left).map(Expression::Call),
        }
    }

    fn parse_identifier(&self) -> Identifier {
        Identifier {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        }
    }

    fn parse_integer_literal(&self) -> Result<IntegerLiteral, ParseError> {
        let value = self.current.literal.parse::<i64>().map_err(|_| {
            ParseError::new(
                ParseErrorKind::InvalidInteger(self.current.literal.clone()),
                self.current.location,
            )
        })?;

        Ok(IntegerLiteral {
            token: self.current.clone(),
            value,
        })
    }

    /// `( expr )`, the parentheses leave no node behind
    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_prefix_expression(
        &mut self,
        operator: PrefixOperator,
    ) -> Result<PrefixExpression, ParseError> {
        let token = self.current.clone();
        self.advance();

        let operand = self.parse_expression(Precedence::Prefix)?;

        Ok(PrefixExpression {
            token,
            operator,
            operand: Box::new(operand),
        })
    }

    fn parse_infix_expression(
        &mut self,
        operator: InfixOperator,
        precedence: Precedence,
        left: Expression,
    ) -> Result<InfixExpression, ParseError> {
        let token = self.current.clone();
        self.advance();

        let right = self.parse_expression(precedence)?;

        Ok(InfixExpression {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `fn ( params ) { body }`
    fn parse_function_literal(&mut self) -> Result<FunctionLiteral, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    /// Parameter list after `(`; returns with `)` in `current`
    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Identifier)?;
        parameters.push(self.parse_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Identifier)?;
            parameters.push(self.parse_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// `callee ( args )` with `(` in `current`
    fn parse_call_expression(&mut self, callee: Expression) -> Result<CallExpression, ParseError> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;

        Ok(CallExpression {
            token,
            callee: Box::new(callee),
            arguments,
        })
    }

    /// Argument list after `(`; returns with `)` in `current`
    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }

        self.advance();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "errors: {:?}", parser.errors());
        program.to_string()
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Lowest < Precedence::LessGreater);
        assert!(Precedence::LessGreater < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::Call);
    }

    #[test]
    fn test_table_lookups() {
        let precedence_of = |kind| infix_rule(kind).map(|(_, precedence)| precedence);

        assert_eq!(precedence_of(TokenKind::Plus), Some(Precedence::Sum));
        assert_eq!(precedence_of(TokenKind::Slash), Some(Precedence::Product));
        assert_eq!(precedence_of(TokenKind::GreaterThan), Some(Precedence::LessGreater));
        assert_eq!(precedence_of(TokenKind::LParen), Some(Precedence::Call));
        assert_eq!(precedence_of(TokenKind::Semicolon), None);
        assert_eq!(prefix_rule(TokenKind::Plus), None);
        assert_eq!(
            prefix_rule(TokenKind::Minus),
            Some(PrefixRule::Unary(PrefixOperator::Negate))
        );
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 < 3", "((5 > 4) < 3)"),
            ("1 + 2 < 3 * 4", "((1 + 2) < (3 * 4))"),
            ("(a + b) * c", "((a + b) * c)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            ("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
            ("-f(x)", "(-f(x))"),
        ];

        for (input, expected) in cases {
            assert_eq!(render(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_function_literal_parameters() {
        let cases = [
            ("fn() {}", "fn() { }"),
            ("fn(x) { x }", "fn(x) { x }"),
            ("fn(x, y, z) { x + y; z }", "fn(x, y, z) { (x + y); z }"),
        ];

        for (input, expected) in cases {
            assert_eq!(render(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_missing_closing_paren() {
        let mut parser = Parser::from_source("(a + b");
        parser.parse_program();

        assert_eq!(
            parser.errors()[0].kind,
            ParseErrorKind::UnexpectedToken {
                expected: TokenKind::RParen,
                found: TokenKind::EndOfInput,
            }
        );
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let mut parser = Parser::from_source("99999999999999999999");
        let program = parser.parse_program();

        assert!(program.statements.is_empty());
        assert_eq!(
            parser.errors()[0].kind,
            ParseErrorKind::InvalidInteger("99999999999999999999".to_string())
        );
    }
}
