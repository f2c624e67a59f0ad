use gravel_intentions::closure_text;
use gravel_syntax::{lambdas, parse, parse_closure};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

#[derive(Debug, Clone)]
enum Body {
    Expression(String),
    Block(String),
}

#[derive(Debug, Clone)]
struct LambdaCase {
    params: Vec<String>,
    parenthesized: bool,
    before_arrow: String,
    after_arrow: String,
    body: Body,
}

impl LambdaCase {
    fn param_text(&self) -> String {
        self.params.join(", ")
    }

    fn source(&self) -> String {
        let params = if self.parenthesized {
            format!("({})", self.param_text())
        } else {
            self.param_text()
        };
        let body = match &self.body {
            Body::Expression(expr) => expr.clone(),
            Body::Block(inner) => format!("{{{inner}}}"),
        };
        format!("{params}{}->{}{body}", self.before_arrow, self.after_arrow)
    }

    fn delimiter_len(&self) -> usize {
        let parens = if self.parenthesized { 2 } else { 0 };
        let braces = match self.body {
            Body::Block(_) => 2,
            Body::Expression(_) => 0,
        };
        parens + braces
    }
}

fn arb_ident() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "x", "it2", "value", "é"]).prop_map(str::to_string)
}

fn arb_param() -> impl Strategy<Value = String> {
    (arb_ident(), prop::sample::select(vec!["", "int ", "String ", "def "]))
        .prop_map(|(name, ty)| format!("{ty}{name}"))
}

fn arb_separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", " ", "  ", " /* c */ ", "\n  "]).prop_map(str::to_string)
}

fn arb_expr() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "a + 1", "f(a, b)", "xs.size()", "'s'", "[a, b]"])
        .prop_map(str::to_string)
}

fn arb_body() -> impl Strategy<Value = Body> {
    prop_oneof![
        arb_expr().prop_map(Body::Expression),
        prop::collection::vec(arb_expr(), 0..3).prop_map(|stmts| {
            if stmts.is_empty() {
                Body::Block(String::new())
            } else {
                Body::Block(format!(" {}; ", stmts.join("; ")))
            }
        }),
    ]
}

fn arb_case() -> impl Strategy<Value = LambdaCase> {
    (
        prop::collection::vec(arb_param(), 0..4),
        any::<bool>(),
        arb_separator(),
        arb_separator(),
        arb_body(),
    )
        .prop_map(|(params, parens, before_arrow, after_arrow, body)| {
            // Only a single untyped parameter may drop its parentheses.
            let parenthesized =
                parens || params.len() != 1 || params[0].contains(' ');
            LambdaCase {
                params,
                parenthesized,
                before_arrow,
                after_arrow,
                body,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn strips_exactly_the_present_delimiters(case in arb_case()) {
        let source = case.source();
        let root = parse(&source).syntax();
        let lambda = lambdas(&root).next().expect("lambda");
        let closure = closure_text(&lambda).expect("lambda has a body");

        prop_assert!(closure.starts_with('{') && closure.ends_with('}'), "closure not brace-delimited: {:?}", closure);
        prop_assert_eq!(closure.len() + case.delimiter_len(), source.len() + 2);
    }

    #[test]
    fn carries_parameters_separator_and_body_verbatim(case in arb_case()) {
        let source = case.source();
        let root = parse(&source).syntax();
        let lambda = lambdas(&root).next().expect("lambda");
        let closure = closure_text(&lambda).expect("lambda has a body");

        let inner = match &case.body {
            Body::Expression(expr) => expr.clone(),
            Body::Block(inner) => inner.clone(),
        };
        let expected = format!(
            "{{{}{}->{}{}}}",
            case.param_text(),
            case.before_arrow,
            case.after_arrow,
            inner
        );
        prop_assert_eq!(closure, expected);
    }

    #[test]
    fn synthesized_text_parses_as_closure(case in arb_case()) {
        let source = case.source();
        let root = parse(&source).syntax();
        let lambda = lambdas(&root).next().expect("lambda");
        let closure = closure_text(&lambda).expect("lambda has a body");
        prop_assert!(parse_closure(&closure).is_ok(), "{}", closure);
    }
}
