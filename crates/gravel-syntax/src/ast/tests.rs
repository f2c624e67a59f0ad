use crate::ast::{
    AstNode, BlockLambdaBody, ClosureExpression, Expression, LambdaBody, LambdaExpression,
    SourceFile,
};
use crate::{parse, SyntaxKind};

#[test]
fn typed_casts_smoke() {
    let parse = parse("(x) -> x");
    assert!(parse.errors.is_empty());

    let root = parse.syntax();
    assert!(SourceFile::cast(root.clone()).is_some());
    assert!(LambdaExpression::cast(root.clone()).is_none());
    assert!(Expression::cast(root).is_none());
}

#[test]
fn lambda_body_enum_dispatches_on_kind() {
    let parse = parse("(a) -> { a }\n(b) -> b");
    let bodies: Vec<_> = parse
        .syntax()
        .descendants()
        .filter_map(LambdaBody::cast)
        .collect();
    assert_eq!(bodies.len(), 2);
    assert!(matches!(bodies[0], LambdaBody::Block(_)));
    assert!(matches!(bodies[1], LambdaBody::Expression(_)));
    assert_eq!(bodies[1].syntax().kind(), SyntaxKind::ExpressionLambdaBody);
    assert!(BlockLambdaBody::can_cast(bodies[0].syntax().kind()));
}

#[test]
fn closure_accessors() {
    let parse = parse("run { final int a, b -> a }");
    assert!(parse.errors.is_empty(), "{:?}", parse.errors);
    let closure = parse
        .syntax()
        .descendants()
        .find_map(ClosureExpression::cast)
        .unwrap();

    assert_eq!(closure.l_brace_token().unwrap().text(), "{");
    assert_eq!(closure.r_brace_token().unwrap().text(), "}");
    let names: Vec<_> = closure
        .parameter_list()
        .unwrap()
        .parameters()
        .filter_map(|p| p.name())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let stmt = closure.statements().next().unwrap();
    let expr = stmt.syntax().children().find_map(Expression::cast).unwrap();
    assert_eq!(expr.kind(), SyntaxKind::NameExpression);
}
