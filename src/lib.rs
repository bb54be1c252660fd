//! # Introduction
//!
//! Quokka is a small C-like scripting language. This crate holds its front
//! end: a hand-written lexer, a Pratt expression parser that collects
//! syntax errors instead of stopping at the first one, and a terminal
//! explorer for stepping through the token stream of a file.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST (+ errors) → Explorer
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST, recording every
//!    [`parser::parse::ParseError`] along the way.
//! 2. [`trace`]: the full token stream with a cursor, used for stepping.
//! 3. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use quokka::parser::lexer::Lexer;
//! use quokka::parser::parse::Parser;
//!
//! let mut parser = Parser::new(Lexer::new("let x = 1 + 2 * 3;"));
//! let program = parser.parse_program();
//!
//! assert!(parser.errors().is_empty());
//! assert_eq!(program.to_string(), "let x=(1 + (2 * 3))");
//! ```

pub mod parser;
pub mod trace;
pub mod ui;
