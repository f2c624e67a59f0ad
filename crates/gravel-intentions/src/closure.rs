use gravel_syntax::{AstNode, LambdaBody, LambdaExpression, SyntaxNode, SyntaxToken};

/// Closure literal text equivalent to `lambda`, or `None` if the lambda has no body.
///
/// Source text is carried over verbatim: the parameter list loses its parentheses,
/// a block body loses its braces, and whatever sits between the parameter list and
/// the body (normally the arrow plus trivia) is copied as-is. The result is not
/// validated.
pub fn closure_text(lambda: &LambdaExpression) -> Option<String> {
    let body = lambda.body()?;
    let params = lambda.parameter_list();

    let mut out = String::from("{");
    if let Some(params) = &params {
        if params.parameters_count() != 0 {
            push_text_between(
                &mut out,
                &params.syntax().to_string(),
                token_len(params.l_paren_token()),
                token_len(params.r_paren_token()),
            )?;
        }
    }
    push_elements_between(
        &mut out,
        lambda.syntax(),
        params.as_ref().map(|p| p.syntax()),
        body.syntax(),
    );
    match &body {
        LambdaBody::Block(block) => push_text_between(
            &mut out,
            &block.syntax().to_string(),
            token_len(block.l_brace_token()),
            token_len(block.r_brace_token()),
        )?,
        LambdaBody::Expression(expr) => out.push_str(&expr.syntax().to_string()),
    }
    out.push('}');
    Some(out)
}

fn token_len(token: Option<SyntaxToken>) -> usize {
    token.map_or(0, |tok| tok.text().len())
}

/// Pushes `text` minus `left` leading and `right` trailing bytes.
///
/// `None` when the delimiters overlap or cut a character; nothing is pushed then.
fn push_text_between(out: &mut String, text: &str, left: usize, right: usize) -> Option<()> {
    let end = text.len().checked_sub(right)?;
    out.push_str(text.get(left..end)?);
    Some(())
}

/// Pushes the text of `parent`'s children strictly after `start` and before `stop`.
///
/// With no `start` the walk begins at the first child; if `stop` is never reached
/// every remaining child is pushed.
fn push_elements_between(
    out: &mut String,
    parent: &SyntaxNode,
    start: Option<&SyntaxNode>,
    stop: &SyntaxNode,
) {
    let mut children = parent.children_with_tokens();
    if let Some(start) = start {
        let _ = children.by_ref().find(|el| el.as_node() == Some(start));
    }
    for el in children.take_while(|el| el.as_node() != Some(stop)) {
        out.push_str(&el.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravel_syntax::{lambdas, parse};
    use pretty_assertions::assert_eq;

    fn convert(src: &str) -> Option<String> {
        let parse = parse(src);
        let lambda = lambdas(&parse.syntax()).next().expect("lambda in source");
        closure_text(&lambda)
    }

    #[test]
    fn expression_body() {
        assert_eq!(convert("(x) -> x + 1").as_deref(), Some("{x -> x + 1}"));
    }

    #[test]
    fn block_body_without_parameters_keeps_arrow() {
        assert_eq!(
            convert("() -> { println(x); return x }").as_deref(),
            Some("{ ->  println(x); return x }")
        );
    }

    #[test]
    fn block_body_with_parameters() {
        assert_eq!(
            convert("(a, b) -> { a + b }").as_deref(),
            Some("{a, b ->  a + b }")
        );
    }

    #[test]
    fn parenless_parameter_strips_nothing() {
        assert_eq!(convert("x -> e").as_deref(), Some("{x -> e}"));
    }

    #[test]
    fn comments_and_whitespace_are_carried_verbatim() {
        assert_eq!(
            convert("( a /* first */,\n  b ) /* sep */ -> // why\n  a").as_deref(),
            Some("{ a /* first */,\n  b  /* sep */ -> // why\n  a}")
        );
    }

    #[test]
    fn typed_parameters_keep_types_and_defaults() {
        assert_eq!(
            convert("(int a, String b = 'x') -> a").as_deref(),
            Some("{int a, String b = 'x' -> a}")
        );
    }

    #[test]
    fn empty_block_body() {
        assert_eq!(convert("() -> {}").as_deref(), Some("{ -> }"));
    }

    #[test]
    fn only_outer_lambda_is_rewritten() {
        assert_eq!(
            convert("(x) -> y -> x + y").as_deref(),
            Some("{x -> y -> x + y}")
        );
    }

    #[test]
    fn missing_body_is_not_convertible() {
        assert_eq!(convert("(x) ->"), None);
        assert_eq!(convert("def f = (x) -> )"), None);
    }

    #[test]
    fn overlapping_or_split_delimiters_push_nothing() {
        let mut out = String::from("{");
        assert_eq!(push_text_between(&mut out, "(a)", 1, 1), Some(()));
        assert_eq!(out, "{a");

        assert_eq!(push_text_between(&mut out, "(", 1, 1), None);
        assert_eq!(push_text_between(&mut out, "(", 2, 0), None);
        assert_eq!(push_text_between(&mut out, "é)", 1, 1), None);
        assert_eq!(out, "{a");
    }
}
