//! Syntax tree and parsing primitives for the Groovy subset Gravel rewrites.
//!
//! - [`parse`]: parses a script into a lossless rowan tree rooted at `SourceFile`.
//! - [`parse_expression`]: parses a single expression snippet.
//! - [`parse_closure`]: parses text that must be exactly one closure literal; this
//!   is the factory used when a rewritten closure is substituted into a tree.

pub mod ast;
mod lexer;
mod parser;
mod ptr;
mod syntax_kind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ast::*;
pub use gravel_core::{TextRange, TextSize};
pub use lexer::{lex, lex_with_errors, LexError, Lexer, Token};
pub use parser::{
    debug_dump, parse_expression, ParseResult, SyntaxElement, SyntaxNode, SyntaxToken,
};
pub use ptr::SyntaxNodePtr;
pub use syntax_kind::{GroovyLanguage, SyntaxKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Parse a Groovy script.
pub fn parse(text: &str) -> ParseResult {
    let result = parser::parse(text);
    tracing::trace!(
        target: "gravel.syntax",
        len = text.len(),
        errors = result.errors.len(),
        "parsed source file"
    );
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClosureParseError {
    #[error("closure text has {} syntax error(s); first: {}", .errors.len(), first_message(.errors))]
    Syntax { errors: Vec<ParseError> },
    #[error("expected a closure expression, found {found:?}")]
    NotAClosure { found: SyntaxKind },
    #[error("closure text is empty")]
    Empty,
}

fn first_message(errors: &[ParseError]) -> &str {
    errors.first().map_or("<none>", |e| e.message.as_str())
}

/// Parse `text` as exactly one closure literal, e.g. `{ a, b -> a + b }`.
///
/// Leading and trailing trivia are allowed; anything else is rejected.
pub fn parse_closure(text: &str) -> Result<ClosureExpression, ClosureParseError> {
    if lex(text)
        .iter()
        .all(|tok| tok.kind.is_trivia() || tok.kind == SyntaxKind::Eof)
    {
        return Err(ClosureParseError::Empty);
    }

    let result = parse_expression(text);
    if !result.errors.is_empty() {
        return Err(ClosureParseError::Syntax {
            errors: result.errors,
        });
    }

    let fragment =
        ExpressionFragment::cast(result.syntax()).ok_or(ClosureParseError::Empty)?;
    let expr = fragment.expression().ok_or(ClosureParseError::Empty)?;
    let found = expr.kind();
    ClosureExpression::cast(expr.syntax().clone())
        .ok_or(ClosureParseError::NotAClosure { found })
}

/// Innermost lambda expression whose range covers `offset`.
///
/// At a boundary between two tokens both neighbours are considered, so a caret
/// right after a lambda still finds it.
pub fn lambda_at_offset(root: &SyntaxNode, offset: TextSize) -> Option<LambdaExpression> {
    if !root.text_range().contains_inclusive(offset) {
        return None;
    }
    root.token_at_offset(offset)
        .filter_map(|tok| {
            tok.parent()
                .and_then(|parent| parent.ancestors().find_map(LambdaExpression::cast))
        })
        .min_by_key(|lambda| lambda.syntax().text_range().len())
}

/// All lambda expressions under `root`, in document (pre-)order.
pub fn lambdas(root: &SyntaxNode) -> impl Iterator<Item = LambdaExpression> {
    root.descendants().filter_map(LambdaExpression::cast)
}
