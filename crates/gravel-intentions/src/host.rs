use std::path::{Path, PathBuf};

use gravel_core::{apply_text_edits, EditError, LineIndex, TextEdit};
use gravel_syntax::{
    parse, parse_closure, AstNode, ClosureParseError, LambdaExpression, ParseError, ParseResult,
    SyntaxNode, SyntaxNodePtr,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("synthesized closure text does not parse: {0}")]
    InvalidClosure(#[from] ClosureParseError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// What an intention needs from the editor holding the tree.
pub trait IntentionHost {
    /// Re-resolve a lambda captured earlier; `None` once it no longer exists.
    fn resolve_lambda(&self, ptr: &SyntaxNodePtr) -> Option<LambdaExpression>;

    /// Parse `closure_text` as a closure literal and substitute it for `target` in a
    /// single edit, returning that edit.
    fn replace_with_closure(
        &mut self,
        target: &LambdaExpression,
        closure_text: &str,
    ) -> Result<TextEdit, ReplaceError>;
}

/// An in-memory Groovy buffer that re-parses after every edit.
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    text: String,
    parse: ParseResult,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let parse = parse(&text);
        Self {
            path: None,
            text,
            parse,
        }
    }

    pub fn with_path(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new(text)
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse.errors
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// Apply `edit` to the buffer and re-parse. Nodes and pointers taken before the
    /// edit may stop resolving.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), EditError> {
        let text = apply_text_edits(&self.text, std::slice::from_ref(edit))?;
        self.parse = parse(&text);
        self.text = text;
        Ok(())
    }
}

impl IntentionHost for Document {
    fn resolve_lambda(&self, ptr: &SyntaxNodePtr) -> Option<LambdaExpression> {
        ptr.cast(&self.syntax())
    }

    fn replace_with_closure(
        &mut self,
        target: &LambdaExpression,
        closure_text: &str,
    ) -> Result<TextEdit, ReplaceError> {
        let closure = parse_closure(closure_text)?;
        let edit = TextEdit::new(target.syntax().text_range(), closure.syntax().to_string());
        self.apply_edit(&edit)?;
        tracing::debug!(
            target: "gravel.intentions",
            path = ?self.path,
            range = ?edit.range,
            "replaced lambda with closure"
        );
        Ok(edit)
    }
}
