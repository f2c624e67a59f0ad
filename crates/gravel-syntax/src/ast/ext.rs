use crate::ast::AstNode;
use crate::{SyntaxKind, SyntaxToken};

impl super::ParameterList {
    pub fn parameters_count(&self) -> usize {
        self.parameters().count()
    }

    /// `(a, b) -> ...` as opposed to the parenless `a -> ...`.
    pub fn is_parenthesized(&self) -> bool {
        self.l_paren_token().is_some()
    }
}

impl super::Parameter {
    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }
}

impl super::LambdaExpression {
    pub fn parameters(&self) -> Vec<super::Parameter> {
        self.parameter_list()
            .map(|list| list.parameters().collect())
            .unwrap_or_default()
    }
}

impl super::ClosureExpression {
    /// `true` for `{ -> ... }` and `{ a -> ... }`, `false` for the implicit-`it` form.
    pub fn has_explicit_parameters(&self) -> bool {
        self.arrow_token().is_some()
    }
}

impl super::Type {
    /// Type text without interior trivia, e.g. `Map<String,Integer>`.
    pub fn text(&self) -> String {
        self.syntax()
            .descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|tok| !tok.kind().is_trivia())
            .map(|tok: SyntaxToken| tok.text().to_string())
            .collect()
    }
}

impl super::Expression {
    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }
}
