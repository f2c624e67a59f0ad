use rowan::Language;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Unified syntax kind for both tokens and tree nodes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    LineComment,
    BlockComment,
    DocComment,

    // --- Identifiers & literals ---
    Identifier,
    IntLiteral,
    DecimalLiteral,
    StringLiteral,

    // --- Keywords ---
    DefKw,
    VarKw,
    FinalKw,
    ReturnKw,
    IfKw,
    ElseKw,
    WhileKw,
    NewKw,
    InKw,
    InstanceofKw,
    ThisKw,
    SuperKw,
    TrueKw,
    FalseKw,
    NullKw,

    // Primitive types.
    BooleanKw,
    ByteKw,
    CharKw,
    ShortKw,
    IntKw,
    LongKw,
    FloatKw,
    DoubleKw,
    VoidKw,

    // --- Punctuation ---
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    SafeDot,
    Question,
    Elvis,
    Colon,
    Arrow,
    Range,

    // --- Operators ---
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Eq,
    EqEq,
    BangEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    LeftShift,

    // --- Special ---
    Error,
    Eof,

    // --- Nodes ---
    SourceFile,
    ExpressionFragment,
    Block,

    ExpressionStatement,
    ReturnStatement,
    LocalVariableDeclaration,
    IfStatement,
    WhileStatement,

    LiteralExpression,
    NameExpression,
    ThisExpression,
    ParenthesizedExpression,
    MethodCallExpression,
    FieldAccessExpression,
    IndexExpression,
    UnaryExpression,
    PostfixExpression,
    BinaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    ListExpression,
    NewExpression,
    LambdaExpression,
    ClosureExpression,

    ArgumentList,
    ParameterList,
    Parameter,
    Type,
    TypeArguments,
    BlockLambdaBody,
    ExpressionLambdaBody,

    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
        )
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::DefKw as u16..=SyntaxKind::VoidKw as u16).contains(&(self as u16))
    }

    pub fn is_primitive_type(self) -> bool {
        (SyntaxKind::BooleanKw as u16..=SyntaxKind::VoidKw as u16).contains(&(self as u16))
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::DecimalLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::TrueKw
                | SyntaxKind::FalseKw
                | SyntaxKind::NullKw
        )
    }

    pub fn is_expression(self) -> bool {
        (SyntaxKind::LiteralExpression as u16..=SyntaxKind::ClosureExpression as u16)
            .contains(&(self as u16))
    }

    pub fn is_statement(self) -> bool {
        (SyntaxKind::ExpressionStatement as u16..=SyntaxKind::WhileStatement as u16)
            .contains(&(self as u16))
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "def" => SyntaxKind::DefKw,
            "var" => SyntaxKind::VarKw,
            "final" => SyntaxKind::FinalKw,
            "return" => SyntaxKind::ReturnKw,
            "if" => SyntaxKind::IfKw,
            "else" => SyntaxKind::ElseKw,
            "while" => SyntaxKind::WhileKw,
            "new" => SyntaxKind::NewKw,
            "in" => SyntaxKind::InKw,
            "instanceof" => SyntaxKind::InstanceofKw,
            "this" => SyntaxKind::ThisKw,
            "super" => SyntaxKind::SuperKw,
            "true" => SyntaxKind::TrueKw,
            "false" => SyntaxKind::FalseKw,
            "null" => SyntaxKind::NullKw,

            "boolean" => SyntaxKind::BooleanKw,
            "byte" => SyntaxKind::ByteKw,
            "char" => SyntaxKind::CharKw,
            "short" => SyntaxKind::ShortKw,
            "int" => SyntaxKind::IntKw,
            "long" => SyntaxKind::LongKw,
            "float" => SyntaxKind::FloatKw,
            "double" => SyntaxKind::DoubleKw,
            "void" => SyntaxKind::VoidKw,

            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for the Groovy subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroovyLanguage {}

impl Language for GroovyLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: We've verified the numeric value is within the enum range.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::Error
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}
