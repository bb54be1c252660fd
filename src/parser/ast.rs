//! AST (Abstract Syntax Tree) definitions for Quokka
//!
//! Each node owns its children and keeps the [`Token`] it was built from, so
//! diagnostics can point back at the source. The [`fmt::Display`] impls
//! produce the canonical rendering: fully parenthesized operators,
//! statements separated by `"; "`, and no dependence on the original
//! whitespace. Rendering a program and parsing the result again yields the
//! same rendering.

use super::token::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate, // -x
    Not,    // !x
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOperator::Negate => write!(f, "-"),
            PrefixOperator::Not => write!(f, "!"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::LessThan => "<",
            InfixOperator::GreaterThan => ">",
        };
        write!(f, "{}", op)
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Literal of the first statement's token, or `""` for an empty program
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }

    /// Index of the top-level statement whose source span starts at or
    /// before `location` and is the last one to do so.
    pub fn statement_at(&self, location: SourceLocation) -> Option<usize> {
        self.statements
            .iter()
            .rposition(|stmt| stmt.location() <= location)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_separated(f, &self.statements, "; ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Let(stmt) => &stmt.token,
            Statement::Return(stmt) => &stmt.token,
            Statement::Expression(stmt) => &stmt.token,
            Statement::Block(stmt) => &stmt.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "{}", stmt),
            Statement::Return(stmt) => write!(f, "{}", stmt),
            Statement::Expression(stmt) => write!(f, "{}", stmt),
            Statement::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// `let <name> = <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}={}", self.token.literal, self.name, self.value)
    }
}

/// `return <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token.literal, self.value)
    }
}

/// An expression in statement position. `token` is the expression's
/// first token.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Brace-delimited statement list, used as function bodies
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        write_separated(f, &self.statements, "; ")?;
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(expr) => &expr.token,
            Expression::Integer(expr) => &expr.token,
            Expression::Prefix(expr) => &expr.token,
            Expression::Infix(expr) => &expr.token,
            Expression::Function(expr) => &expr.token,
            Expression::Call(expr) => &expr.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(expr) => write!(f, "{}", expr),
            Expression::Integer(expr) => write!(f, "{}", expr),
            Expression::Prefix(expr) => write!(f, "{}", expr),
            Expression::Infix(expr) => write!(f, "{}", expr),
            Expression::Function(expr) => write!(f, "{}", expr),
            Expression::Call(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

/// `-x` or `!x`; `token` is the operator token
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: PrefixOperator,
    pub operand: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.operand)
    }
}

/// `left <op> right`; `token` is the operator token
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.token.literal)?;
        write_separated(f, &self.parameters, ", ")?;
        write!(f, ") {}", self.body)
    }
}

/// `callee(arguments...)`; `token` is the opening parenthesis
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        write_separated(f, &self.arguments, ", ")?;
        write!(f, ")")
    }
}

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenKind;

    fn token(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal, SourceLocation::new(1, 1))
    }

    fn ident(name: &str) -> Identifier {
        Identifier {
            token: token(TokenKind::Identifier, name),
            value: name.to_string(),
        }
    }

    #[test]
    fn test_let_statement_rendering() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: token(TokenKind::Let, "let"),
                name: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            })],
        };

        assert_eq!(program.to_string(), "let myVar=anotherVar");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_empty_program() {
        let program = Program::new();

        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
        assert_eq!(program.statement_at(SourceLocation::new(1, 1)), None);
    }

    #[test]
    fn test_nested_expression_rendering() {
        let product = Expression::Infix(InfixExpression {
            token: token(TokenKind::Asterisk, "*"),
            operator: InfixOperator::Multiply,
            left: Box::new(Expression::Identifier(ident("b"))),
            right: Box::new(Expression::Identifier(ident("c"))),
        });
        let negated = Expression::Prefix(PrefixExpression {
            token: token(TokenKind::Minus, "-"),
            operator: PrefixOperator::Negate,
            operand: Box::new(Expression::Identifier(ident("a"))),
        });
        let sum = Expression::Infix(InfixExpression {
            token: token(TokenKind::Plus, "+"),
            operator: InfixOperator::Plus,
            left: Box::new(negated),
            right: Box::new(product),
        });

        assert_eq!(sum.to_string(), "((-a) + (b * c))");
        assert_eq!(sum.token_literal(), "+");
    }

    #[test]
    fn test_function_and_call_rendering() {
        let body = BlockStatement {
            token: token(TokenKind::LBrace, "{"),
            statements: vec![Statement::Return(ReturnStatement {
                token: token(TokenKind::Return, "return"),
                value: Expression::Identifier(ident("x")),
            })],
        };
        let function = Expression::Function(FunctionLiteral {
            token: token(TokenKind::Function, "fn"),
            parameters: vec![ident("x"), ident("y")],
            body,
        });
        let call = Expression::Call(CallExpression {
            token: token(TokenKind::LParen, "("),
            callee: Box::new(function),
            arguments: vec![Expression::Integer(IntegerLiteral {
                token: token(TokenKind::Integer, "1"),
                value: 1,
            })],
        });

        assert_eq!(call.to_string(), "fn(x, y) { return x }(1)");
    }

    #[test]
    fn test_empty_block_rendering() {
        let block = BlockStatement {
            token: token(TokenKind::LBrace, "{"),
            statements: Vec::new(),
        };

        assert_eq!(block.to_string(), "{ }");
    }
}
