use std::collections::VecDeque;

use gravel_core::{TextRange, TextSize};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, NodeOrToken};

use crate::lexer::{lex_with_errors, Token};
use crate::syntax_kind::{GroovyLanguage, SyntaxKind};
use crate::ParseError;

pub type SyntaxNode = rowan::SyntaxNode<GroovyLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GroovyLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GroovyLanguage>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub green: GreenNode,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// Parse a Groovy script into a lossless `SourceFile` tree.
pub fn parse(input: &str) -> ParseResult {
    Parser::new(input).parse_source_file()
}

/// Parse a single expression snippet into an `ExpressionFragment` tree.
pub fn parse_expression(input: &str) -> ParseResult {
    Parser::new(input).parse_expression_fragment()
}

struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
    /// Number of non-trivia tokens consumed so far.
    consumed: usize,
    /// Non-zero inside `(...)` and `[...]`, where newlines do not end expressions.
    newline_insensitive: u32,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let (mut tokens, lex_errors) = lex_with_errors(input);
        if tokens.last().is_some_and(|t| t.kind == SyntaxKind::Eof) {
            tokens.pop();
        }
        Self {
            input,
            tokens: VecDeque::from(tokens),
            builder: GreenNodeBuilder::new(),
            errors: lex_errors
                .into_iter()
                .map(|e| ParseError {
                    message: e.message,
                    range: e.range,
                })
                .collect(),
            consumed: 0,
            newline_insensitive: 0,
        }
    }

    fn parse_source_file(mut self) -> ParseResult {
        self.builder.start_node(SyntaxKind::SourceFile.into());
        self.parse_statements(SyntaxKind::Eof);
        self.eat_trivia();
        self.builder.finish_node();
        self.finish()
    }

    fn parse_expression_fragment(mut self) -> ParseResult {
        self.builder.start_node(SyntaxKind::ExpressionFragment.into());
        self.newline_insensitive += 1;
        self.parse_expression(0);
        self.newline_insensitive -= 1;
        if !self.at(SyntaxKind::Eof) {
            self.eat_trivia();
            self.builder.start_node(SyntaxKind::Error.into());
            self.error_here("unexpected input after expression");
            while !self.tokens.is_empty() {
                self.bump_any();
            }
            self.builder.finish_node();
        }
        self.eat_trivia();
        self.builder.finish_node();
        self.finish()
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // --- Statements ---

    fn parse_statements(&mut self, until: SyntaxKind) {
        while !self.at(until) && !self.at(SyntaxKind::Eof) {
            let before = self.consumed;
            self.parse_statement();
            if self.consumed == before {
                // Stray closing delimiter; wrap it so the loop always makes progress.
                self.eat_trivia();
                self.builder.start_node(SyntaxKind::Error.into());
                self.error_here("unexpected token");
                self.bump();
                self.builder.finish_node();
            }
        }
    }

    /// Statements inside `{ ... }` are newline-separated even when the braces are
    /// nested in parentheses.
    fn statements_until_r_brace(&mut self) {
        let saved = std::mem::take(&mut self.newline_insensitive);
        self.parse_statements(SyntaxKind::RBrace);
        self.newline_insensitive = saved;
    }

    fn parse_statement(&mut self) {
        self.eat_trivia();
        match self.current() {
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::ReturnKw => {
                self.builder.start_node(SyntaxKind::ReturnStatement.into());
                self.bump();
                if !self.at_statement_end() {
                    self.parse_expression(0);
                }
                self.eat_semicolon();
                self.builder.finish_node();
            }
            SyntaxKind::IfKw => {
                self.builder.start_node(SyntaxKind::IfStatement.into());
                self.bump();
                self.parse_condition();
                self.parse_statement_body();
                if self.at(SyntaxKind::ElseKw) {
                    self.bump();
                    self.parse_statement_body();
                }
                self.builder.finish_node();
            }
            SyntaxKind::WhileKw => {
                self.builder.start_node(SyntaxKind::WhileStatement.into());
                self.bump();
                self.parse_condition();
                self.parse_statement_body();
                self.builder.finish_node();
            }
            _ if self.at_local_variable_declaration() => {
                self.builder
                    .start_node(SyntaxKind::LocalVariableDeclaration.into());
                if self.at(SyntaxKind::FinalKw) {
                    self.bump();
                }
                if self.at_typed_name() {
                    self.parse_type();
                }
                self.expect(SyntaxKind::Identifier, "expected variable name");
                if self.at(SyntaxKind::Eq) {
                    self.bump();
                    self.parse_expression(0);
                }
                self.eat_semicolon();
                self.builder.finish_node();
            }
            _ => {
                self.builder
                    .start_node(SyntaxKind::ExpressionStatement.into());
                self.parse_expression(0);
                self.eat_semicolon();
                self.builder.finish_node();
            }
        }
    }

    fn parse_condition(&mut self) {
        self.expect(SyntaxKind::LParen, "expected `(`");
        self.newline_insensitive += 1;
        self.parse_expression(0);
        self.newline_insensitive -= 1;
        self.expect(SyntaxKind::RParen, "expected `)`");
    }

    fn parse_statement_body(&mut self) {
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.parse_statement();
        }
    }

    fn parse_block(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::Block.into());
        self.expect(SyntaxKind::LBrace, "expected `{`");
        self.statements_until_r_brace();
        self.expect(SyntaxKind::RBrace, "expected `}`");
        self.builder.finish_node();
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::Semicolon | SyntaxKind::RBrace | SyntaxKind::Eof
        ) || self.newline_before_current()
    }

    fn eat_semicolon(&mut self) {
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
    }

    fn at_local_variable_declaration(&self) -> bool {
        self.at(SyntaxKind::FinalKw) || self.at_typed_name()
    }

    /// `def x`, `var x`, `int x`, `List<String> xs`, ...
    fn at_typed_name(&self) -> bool {
        if matches!(self.current(), SyntaxKind::DefKw | SyntaxKind::VarKw) {
            return true;
        }
        let kinds: Vec<SyntaxKind> = self.lookahead().take(64).collect();
        type_len(&kinds).is_some_and(|len| kinds.get(len) == Some(&SyntaxKind::Identifier))
    }

    // --- Types & parameters ---

    fn parse_type(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::Type.into());
        match self.current() {
            SyntaxKind::DefKw | SyntaxKind::VarKw => self.bump(),
            kind if kind.is_primitive_type() => self.bump(),
            SyntaxKind::Identifier => {
                self.bump();
                while self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
                    self.bump();
                    self.bump();
                }
                if self.at(SyntaxKind::Less) {
                    self.parse_type_arguments();
                }
            }
            _ => self.error_here("expected type"),
        }
        while self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_type_arguments(&mut self) {
        self.builder.start_node(SyntaxKind::TypeArguments.into());
        self.bump(); // <
        while !self.at(SyntaxKind::Greater) && !self.at(SyntaxKind::Eof) {
            if self.at(SyntaxKind::Question) {
                self.bump();
            } else {
                self.parse_type();
            }
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.expect(SyntaxKind::Greater, "expected `>`");
        self.builder.finish_node();
    }

    fn parse_parameter(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::Parameter.into());
        if self.at(SyntaxKind::FinalKw) {
            self.bump();
        }
        if self.at_typed_name() {
            self.parse_type();
        }
        if self.at(SyntaxKind::Identifier) {
            self.bump();
        } else {
            self.error_here("expected parameter name");
            if !matches!(
                self.current(),
                SyntaxKind::RParen | SyntaxKind::Comma | SyntaxKind::Arrow | SyntaxKind::Eof
            ) {
                self.bump();
            }
        }
        if self.at(SyntaxKind::Eq) {
            self.bump();
            self.newline_insensitive += 1;
            self.parse_expression(0);
            self.newline_insensitive -= 1;
        }
        self.builder.finish_node();
    }

    fn parse_parenthesized_parameters(&mut self) {
        self.builder.start_node(SyntaxKind::ParameterList.into());
        self.bump(); // (
        self.newline_insensitive += 1;
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            self.parse_parameter();
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.newline_insensitive -= 1;
        self.expect(SyntaxKind::RParen, "expected `)` in lambda parameters");
        self.builder.finish_node();
    }

    // --- Expressions ---

    fn parse_expression(&mut self, min_bp: u8) {
        self.eat_trivia();
        let checkpoint = self.builder.checkpoint();
        let mut lhs = self.parse_primary(checkpoint);

        loop {
            let op = self.current();
            let same_line = !self.expression_ends_at_newline();

            // Postfix: call, trailing closure, member access, index.
            match op {
                SyntaxKind::LParen if same_line && min_bp <= 120 => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MethodCallExpression.into());
                    self.parse_argument_list();
                    if self.at(SyntaxKind::LBrace) && !self.expression_ends_at_newline() {
                        self.parse_closure_expression();
                    }
                    self.builder.finish_node();
                    lhs = SyntaxKind::MethodCallExpression;
                    continue;
                }
                SyntaxKind::LBrace if same_line && min_bp <= 120 && accepts_trailing_closure(lhs) => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MethodCallExpression.into());
                    self.parse_closure_expression();
                    self.builder.finish_node();
                    lhs = SyntaxKind::MethodCallExpression;
                    continue;
                }
                SyntaxKind::Dot | SyntaxKind::SafeDot
                    if min_bp <= 120 && self.nth(1) == SyntaxKind::Identifier =>
                {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::FieldAccessExpression.into());
                    self.bump();
                    self.bump();
                    self.builder.finish_node();
                    lhs = SyntaxKind::FieldAccessExpression;
                    continue;
                }
                SyntaxKind::LBracket if same_line && min_bp <= 120 => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::IndexExpression.into());
                    self.bump();
                    self.newline_insensitive += 1;
                    self.parse_expression(0);
                    self.newline_insensitive -= 1;
                    self.expect(SyntaxKind::RBracket, "expected `]`");
                    self.builder.finish_node();
                    lhs = SyntaxKind::IndexExpression;
                    continue;
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus if same_line && min_bp <= 120 => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::PostfixExpression.into());
                    self.bump();
                    self.builder.finish_node();
                    lhs = SyntaxKind::PostfixExpression;
                    continue;
                }
                _ => {}
            }

            // An operator on the next line starts a new statement.
            if !same_line {
                break;
            }

            if let Some((l_bp, r_bp, expr_kind)) = infix_binding_power(op) {
                if l_bp < min_bp {
                    break;
                }
                self.builder.start_node_at(checkpoint, expr_kind.into());
                self.bump();
                self.parse_expression(r_bp);
                self.builder.finish_node();
                lhs = expr_kind;
                continue;
            }

            if op == SyntaxKind::Question {
                let (l_bp, r_bp) = (2, 1);
                if l_bp < min_bp {
                    break;
                }
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ConditionalExpression.into());
                self.bump(); // ?
                self.parse_expression(0);
                self.expect(SyntaxKind::Colon, "expected `:` in conditional expression");
                self.parse_expression(r_bp);
                self.builder.finish_node();
                lhs = SyntaxKind::ConditionalExpression;
                continue;
            }

            break;
        }
    }

    /// Parses a primary expression and returns the kind of node it produced.
    fn parse_primary(&mut self, checkpoint: Checkpoint) -> SyntaxKind {
        let kind = match self.current() {
            kind if kind.is_literal() => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::LiteralExpression.into());
                self.bump();
                SyntaxKind::LiteralExpression
            }
            SyntaxKind::ThisKw | SyntaxKind::SuperKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ThisExpression.into());
                self.bump();
                SyntaxKind::ThisExpression
            }
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::Arrow => {
                self.parse_lambda_expression(checkpoint);
                return SyntaxKind::LambdaExpression;
            }
            SyntaxKind::Identifier => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::NameExpression.into());
                self.bump();
                SyntaxKind::NameExpression
            }
            SyntaxKind::LParen if self.is_lambda_paren() => {
                self.parse_lambda_expression(checkpoint);
                return SyntaxKind::LambdaExpression;
            }
            SyntaxKind::LParen => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ParenthesizedExpression.into());
                self.bump();
                self.newline_insensitive += 1;
                self.parse_expression(0);
                self.newline_insensitive -= 1;
                self.expect(SyntaxKind::RParen, "expected `)`");
                SyntaxKind::ParenthesizedExpression
            }
            SyntaxKind::LBrace => {
                self.parse_closure_expression();
                return SyntaxKind::ClosureExpression;
            }
            SyntaxKind::LBracket => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ListExpression.into());
                self.parse_list_elements();
                SyntaxKind::ListExpression
            }
            SyntaxKind::NewKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::NewExpression.into());
                self.bump();
                self.parse_type();
                if self.at(SyntaxKind::LParen) {
                    self.parse_argument_list();
                }
                SyntaxKind::NewExpression
            }
            SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Bang
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::UnaryExpression.into());
                self.bump();
                self.parse_expression(100);
                SyntaxKind::UnaryExpression
            }
            _ => {
                self.builder.start_node_at(checkpoint, SyntaxKind::Error.into());
                self.error_here("expected expression");
                // Closing delimiters belong to the enclosing construct.
                if !matches!(
                    self.current(),
                    SyntaxKind::RParen
                        | SyntaxKind::RBracket
                        | SyntaxKind::RBrace
                        | SyntaxKind::Semicolon
                        | SyntaxKind::Eof
                ) {
                    self.bump();
                }
                SyntaxKind::Error
            }
        };
        self.builder.finish_node();
        kind
    }

    /// `[a, b]`, `[k: v]`, `[:]`; the cursor is on `[`.
    fn parse_list_elements(&mut self) {
        self.bump(); // [
        self.newline_insensitive += 1;
        if self.at(SyntaxKind::Colon) && self.nth(1) == SyntaxKind::RBracket {
            self.bump();
        }
        while !self.at(SyntaxKind::RBracket) && !self.at(SyntaxKind::Eof) {
            self.parse_expression(0);
            if self.at(SyntaxKind::Colon) {
                self.bump();
                self.parse_expression(0);
            }
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.newline_insensitive -= 1;
        self.expect(SyntaxKind::RBracket, "expected `]`");
    }

    fn parse_argument_list(&mut self) {
        self.builder.start_node(SyntaxKind::ArgumentList.into());
        self.bump(); // (
        self.newline_insensitive += 1;
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            // Named argument: `name: value`.
            if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::Colon {
                self.bump();
                self.bump();
            }
            self.parse_expression(0);
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.newline_insensitive -= 1;
        self.expect(SyntaxKind::RParen, "expected `)`");
        self.builder.finish_node();
    }

    fn parse_lambda_expression(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::LambdaExpression.into());
        if self.at(SyntaxKind::LParen) {
            self.parse_parenthesized_parameters();
        } else {
            self.builder.start_node(SyntaxKind::ParameterList.into());
            self.parse_parameter();
            self.builder.finish_node();
        }
        self.expect(SyntaxKind::Arrow, "expected `->` in lambda");
        self.parse_lambda_body();
        self.builder.finish_node();
    }

    fn parse_lambda_body(&mut self) {
        if self.at(SyntaxKind::LBrace) {
            self.eat_trivia();
            self.builder.start_node(SyntaxKind::BlockLambdaBody.into());
            self.bump();
            self.statements_until_r_brace();
            self.expect(SyntaxKind::RBrace, "expected `}` to close lambda body");
            self.builder.finish_node();
        } else if can_start_expression(self.current()) {
            self.eat_trivia();
            self.builder
                .start_node(SyntaxKind::ExpressionLambdaBody.into());
            self.parse_expression(0);
            self.builder.finish_node();
        } else {
            self.error_here("expected lambda body");
        }
    }

    fn parse_closure_expression(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::ClosureExpression.into());
        self.bump(); // {
        if self.closure_has_parameters() {
            self.eat_trivia();
            self.builder.start_node(SyntaxKind::ParameterList.into());
            if !self.at(SyntaxKind::Arrow) {
                loop {
                    self.parse_parameter();
                    if self.at(SyntaxKind::Comma) {
                        self.bump();
                        continue;
                    }
                    break;
                }
            }
            self.builder.finish_node();
            self.expect(SyntaxKind::Arrow, "expected `->` after closure parameters");
        }
        self.statements_until_r_brace();
        self.expect(SyntaxKind::RBrace, "expected `}` to close closure");
        self.builder.finish_node();
    }

    /// Looks for `->` ahead of the first statement of a closure whose `{` has
    /// already been consumed.
    fn closure_has_parameters(&self) -> bool {
        let mut depth = 0usize;
        let mut in_default = false;
        for kind in self.lookahead() {
            match kind {
                SyntaxKind::Arrow if depth == 0 => return true,
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ if depth > 0 => {}
                SyntaxKind::Semicolon => return false,
                SyntaxKind::Comma => in_default = false,
                SyntaxKind::Eq => in_default = true,
                _ if in_default => {}
                SyntaxKind::Identifier
                | SyntaxKind::Dot
                | SyntaxKind::Less
                | SyntaxKind::Greater
                | SyntaxKind::Question
                | SyntaxKind::DefKw
                | SyntaxKind::VarKw
                | SyntaxKind::FinalKw => {}
                kind if kind.is_primitive_type() => {}
                _ => return false,
            }
        }
        false
    }

    /// `(` ... matching `)` followed by `->`.
    fn is_lambda_paren(&self) -> bool {
        let mut depth = 0usize;
        let mut kinds = self.lookahead();
        while let Some(kind) = kinds.next() {
            match kind {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return kinds.next() == Some(SyntaxKind::Arrow);
                    }
                }
                _ => {}
            }
        }
        false
    }

    // --- Token plumbing ---

    /// Upcoming non-trivia token kinds, without consuming anything.
    fn lookahead(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        self.tokens
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_trivia())
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.lookahead().nth(n).unwrap_or(SyntaxKind::Eof)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn newline_before_current(&self) -> bool {
        self.tokens
            .iter()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| t.text(self.input).contains(['\n', '\r']))
    }

    fn expression_ends_at_newline(&self) -> bool {
        self.newline_insensitive == 0 && self.newline_before_current()
    }

    fn eat_trivia(&mut self) {
        while self.tokens.front().is_some_and(|t| t.kind.is_trivia()) {
            self.bump_any();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    fn bump_any(&mut self) {
        if let Some(tok) = self.tokens.pop_front() {
            if !tok.kind.is_trivia() {
                self.consumed += 1;
            }
            self.builder.token(tok.kind.into(), tok.text(self.input));
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error_here(message);
            false
        }
    }

    fn error_here(&mut self, message: &str) {
        let range = self
            .tokens
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.input)));
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }
}

/// Number of leading tokens in `kinds` that form a type, if any.
fn type_len(kinds: &[SyntaxKind]) -> Option<usize> {
    let at = |n: usize| kinds.get(n).copied().unwrap_or(SyntaxKind::Eof);
    let mut n = 0;
    match at(0) {
        kind if kind.is_primitive_type() => n += 1,
        SyntaxKind::Identifier => {
            n += 1;
            while at(n) == SyntaxKind::Dot && at(n + 1) == SyntaxKind::Identifier {
                n += 2;
            }
            if at(n) == SyntaxKind::Less {
                let mut depth = 0usize;
                loop {
                    match at(n) {
                        SyntaxKind::Less => depth += 1,
                        SyntaxKind::Greater => depth -= 1,
                        SyntaxKind::Identifier
                        | SyntaxKind::Comma
                        | SyntaxKind::Dot
                        | SyntaxKind::Question
                        | SyntaxKind::LBracket
                        | SyntaxKind::RBracket => {}
                        kind if kind.is_primitive_type() => {}
                        _ => return None,
                    }
                    n += 1;
                    if depth == 0 {
                        break;
                    }
                }
            }
        }
        _ => return None,
    }
    while at(n) == SyntaxKind::LBracket && at(n + 1) == SyntaxKind::RBracket {
        n += 2;
    }
    Some(n)
}

fn accepts_trailing_closure(lhs: SyntaxKind) -> bool {
    matches!(
        lhs,
        SyntaxKind::NameExpression
            | SyntaxKind::FieldAccessExpression
            | SyntaxKind::MethodCallExpression
    )
}

fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::ThisKw
                | SyntaxKind::SuperKw
                | SyntaxKind::NewKw
                | SyntaxKind::LParen
                | SyntaxKind::LBrace
                | SyntaxKind::LBracket
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Bang
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
        )
}

fn infix_binding_power(op: SyntaxKind) -> Option<(u8, u8, SyntaxKind)> {
    // Returns (left_bp, right_bp, node_kind). Larger binds tighter.
    let (l, r, kind) = match op {
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => {
            (70, 71, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::Plus | SyntaxKind::Minus => (60, 61, SyntaxKind::BinaryExpression),
        SyntaxKind::LeftShift => (55, 56, SyntaxKind::BinaryExpression),
        SyntaxKind::Range => (52, 53, SyntaxKind::BinaryExpression),
        SyntaxKind::Less
        | SyntaxKind::LessEq
        | SyntaxKind::Greater
        | SyntaxKind::GreaterEq
        | SyntaxKind::InKw
        | SyntaxKind::InstanceofKw => (50, 51, SyntaxKind::BinaryExpression),
        SyntaxKind::EqEq | SyntaxKind::BangEq => (45, 46, SyntaxKind::BinaryExpression),
        SyntaxKind::AmpAmp => (30, 31, SyntaxKind::BinaryExpression),
        SyntaxKind::PipePipe => (20, 21, SyntaxKind::BinaryExpression),
        SyntaxKind::Elvis => (4, 3, SyntaxKind::BinaryExpression),

        // Assignment (right-associative).
        SyntaxKind::Eq
        | SyntaxKind::PlusEq
        | SyntaxKind::MinusEq
        | SyntaxKind::StarEq
        | SyntaxKind::SlashEq => (1, 0, SyntaxKind::AssignmentExpression),

        _ => return None,
    };
    Some((l, r, kind))
}

/// Render an indented `Kind "text"` dump of a tree.
pub fn debug_dump(node: &SyntaxNode) -> String {
    fn go(node: &SyntaxNode, indent: usize, out: &mut String) {
        use std::fmt::Write;
        let _ = writeln!(
            out,
            "{:indent$}{:?}@{:?}",
            "",
            node.kind(),
            node.text_range(),
            indent = indent
        );
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => go(&n, indent + 2, out),
                NodeOrToken::Token(t) => {
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?} {:?}",
                        "",
                        t.kind(),
                        t.text(),
                        indent = indent + 2
                    );
                }
            }
        }
    }

    let mut out = String::new();
    go(node, 0, &mut out);
    out
}
