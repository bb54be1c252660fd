//! Quokka source code parser
//!
//! This module transforms Quokka source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds and the keyword table
//! - [`lexer`]: Tokenization (source text → tokens), one token per call
//! - [`parse`]: Parsing (tokens → AST), error collection and recovery
//! - [`ast`]: AST node definitions and canonical rendering
//!
//! # Supported Language
//!
//! - Statements: `let name = expr`, `return expr`, expression statements,
//!   `{ ... }` blocks; the trailing `;` is optional
//! - Expressions: identifiers, 64-bit integers, unary `-` `!`, binary
//!   `+ - * / < >`, grouping, `fn(params) { body }` literals, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent for statements, Pratt parsing for
//! expressions. No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;

pub use expressions::{infix_rule, prefix_rule, InfixRule, Precedence, PrefixRule};
