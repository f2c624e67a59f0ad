//! Stable handles to syntax nodes that survive re-parsing.

use gravel_core::TextRange;
use rowan::NodeOrToken;
use serde::{Deserialize, Serialize};

use crate::ast::AstNode;
use crate::parser::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

/// Identifies a node by `(kind, range)` instead of holding on to a tree.
///
/// Resolution fails once the text under the node has changed shape, which is how
/// callers detect that a previously offered action went stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntaxNodePtr {
    kind: SyntaxKind,
    range: TextRange,
}

impl SyntaxNodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn from_ast<N: AstNode>(node: &N) -> Self {
        Self::new(node.syntax())
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn try_to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .take_while(|node| node.text_range() == self.range)
            .find(|node| node.kind() == self.kind)
    }

    pub fn cast<N: AstNode>(&self, root: &SyntaxNode) -> Option<N> {
        self.try_to_node(root).and_then(N::cast)
    }
}
