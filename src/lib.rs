//! A tokeniser, Pratt parser and tree-walking evaluator for a small
//! C-like expression language.
//!
//! ```
//! let result = minic::run("if (1 < 2) { 10 * 3 } else { 0 }").unwrap();
//! assert_eq!(result.to_string(), "30");
//! ```
//!
//! Both the parser and the evaluator recurse once per level of nesting, with
//! no depth guard. Deeply nested input, such as a few thousand nested
//! parentheses, overflows the stack and aborts the process. Acceptable input
//! is bounded in nesting depth by the stack size of the calling thread.

pub mod ast;
pub mod interpreter;
pub mod parser;
pub mod tokeniser;

use anyhow::{Result, bail};

pub use interpreter::{FALSE, NULL, Object, TRUE, evaluate};

/// Parse a program, returning the tree alongside every diagnostic produced.
///
/// The tree is returned even when there are diagnostics. Statements that
/// failed to parse are simply missing from it.
pub fn parse(source: &str) -> (ast::Program<'_>, Vec<String>) {
    parser::parse(source)
}

/// Parse and evaluate a program.
pub fn run(source: &str) -> Result<Object> {
    let (program, errors) = parse(source);
    if !errors.is_empty() {
        bail!(errors.join("\n"));
    }
    evaluate(&program)
}
