use crate::ast::{support, AstNode};
use crate::parser::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then_some(Self { syntax })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(SourceFile, SourceFile);
ast_node!(ExpressionFragment, ExpressionFragment);
ast_node!(Block, Block);
ast_node!(LambdaExpression, LambdaExpression);
ast_node!(ClosureExpression, ClosureExpression);
ast_node!(ParameterList, ParameterList);
ast_node!(Parameter, Parameter);
ast_node!(Type, Type);
ast_node!(BlockLambdaBody, BlockLambdaBody);
ast_node!(ExpressionLambdaBody, ExpressionLambdaBody);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children::<Statement>(&self.syntax)
    }
}

impl ExpressionFragment {
    pub fn expression(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl Block {
    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::last_token(&self.syntax, SyntaxKind::RBrace)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children::<Statement>(&self.syntax)
    }
}

impl LambdaExpression {
    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(&self.syntax)
    }

    pub fn arrow_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Arrow)
    }

    pub fn body(&self) -> Option<LambdaBody> {
        support::child::<LambdaBody>(&self.syntax)
    }
}

impl ClosureExpression {
    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(&self.syntax)
    }

    pub fn arrow_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Arrow)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children::<Statement>(&self.syntax)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::last_token(&self.syntax, SyntaxKind::RBrace)
    }
}

impl ParameterList {
    pub fn l_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children::<Parameter>(&self.syntax)
    }

    pub fn r_paren_token(&self) -> Option<SyntaxToken> {
        support::last_token(&self.syntax, SyntaxKind::RParen)
    }
}

impl Parameter {
    pub fn ty(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }

    pub fn default_value(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl BlockLambdaBody {
    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children::<Statement>(&self.syntax)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::last_token(&self.syntax, SyntaxKind::RBrace)
    }
}

impl ExpressionLambdaBody {
    pub fn expression(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LambdaBody {
    Block(BlockLambdaBody),
    Expression(ExpressionLambdaBody),
}

impl AstNode for LambdaBody {
    fn can_cast(kind: SyntaxKind) -> bool {
        BlockLambdaBody::can_cast(kind) || ExpressionLambdaBody::can_cast(kind)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            SyntaxKind::BlockLambdaBody => BlockLambdaBody::cast(syntax).map(Self::Block),
            SyntaxKind::ExpressionLambdaBody => {
                ExpressionLambdaBody::cast(syntax).map(Self::Expression)
            }
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Block(it) => it.syntax(),
            Self::Expression(it) => it.syntax(),
        }
    }
}

/// Any expression node; inspect [`SyntaxNode::kind`] for the concrete shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    syntax: SyntaxNode,
}

impl AstNode for Expression {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expression()
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        Self::can_cast(syntax.kind()).then_some(Self { syntax })
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.syntax
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    syntax: SyntaxNode,
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_statement()
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        Self::can_cast(syntax.kind()).then_some(Self { syntax })
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.syntax
    }
}
