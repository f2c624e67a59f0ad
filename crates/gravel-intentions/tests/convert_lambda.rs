use gravel_core::{TextEdit, TextRange, TextSize};
use gravel_intentions::{
    closure_text, convert_all, intentions_at, ConvertLambdaToClosure, Document, IntentionHost,
    ReplaceError,
};
use gravel_syntax::{lambdas, AstNode, LambdaExpression, SyntaxNodePtr};
use pretty_assertions::assert_eq;

fn intention_for_first_lambda(doc: &Document) -> ConvertLambdaToClosure {
    let lambda = lambdas(&doc.syntax()).next().expect("lambda in document");
    ConvertLambdaToClosure::new(&lambda)
}

fn convert_first(text: &str) -> String {
    let mut doc = Document::new(text);
    let intention = intention_for_first_lambda(&doc);
    intention
        .invoke(&mut doc)
        .expect("replacement succeeds")
        .expect("lambda converted");
    doc.text().to_string()
}

#[test]
fn converts_expression_lambda_in_place() {
    assert_eq!(
        convert_first("def inc = (x) -> x + 1\n"),
        "def inc = {x -> x + 1}\n"
    );
}

#[test]
fn converts_block_lambda_without_parameters() {
    assert_eq!(
        convert_first("run(() -> { println(x); return x })"),
        "run({ ->  println(x); return x })"
    );
}

#[test]
fn converts_block_lambda_with_parameters() {
    assert_eq!(
        convert_first("xs.inject(0, (a, b) -> { a + b })"),
        "xs.inject(0, {a, b ->  a + b })"
    );
}

#[test]
fn converted_text_reparses_as_closure_without_errors() {
    let mut doc = Document::new("def f = (int a, b) -> {\n  def c = a * b\n  c + 1\n}\n");
    let intention = intention_for_first_lambda(&doc);
    intention.invoke(&mut doc).unwrap().unwrap();
    assert!(doc.parse_errors().is_empty(), "{:?}", doc.parse_errors());
    assert_eq!(lambdas(&doc.syntax()).count(), 0);
    assert_eq!(
        doc.text(),
        "def f = {int a, b -> \n  def c = a * b\n  c + 1\n}\n"
    );
}

#[test]
fn stale_intention_is_unavailable_and_does_nothing() {
    let mut doc = Document::new("def f = (x) -> x");
    let intention = intention_for_first_lambda(&doc);
    assert!(intention.is_available(&doc));

    doc.apply_edit(&TextEdit::insert(TextSize::from(0), "// moved\n"))
        .unwrap();
    assert!(!intention.is_available(&doc));
    assert_eq!(intention.invoke(&mut doc).unwrap(), None);
    assert_eq!(doc.text(), "// moved\ndef f = (x) -> x");
}

#[test]
fn lambda_without_body_is_left_alone() {
    let mut doc = Document::new("def f = (x) ->");
    let intention = intention_for_first_lambda(&doc);
    assert!(intention.is_available(&doc));
    assert_eq!(intention.invoke(&mut doc).unwrap(), None);
    assert_eq!(doc.text(), "def f = (x) ->");
}

#[test]
fn returned_edit_covers_the_lambda() {
    let text = "foo((a) -> a)";
    let mut doc = Document::new(text);
    let edit = intention_for_first_lambda(&doc)
        .invoke(&mut doc)
        .unwrap()
        .unwrap();
    assert_eq!(
        edit,
        TextEdit::new(
            TextRange::new(TextSize::from(4), TextSize::from(12)),
            "{a -> a}"
        )
    );
}

#[test]
fn intentions_at_caret_on_arrow() {
    let text = "list.collect((x) -> x * 2)";
    let doc = Document::new(text);
    let offset = TextSize::from(text.find("->").unwrap() as u32);
    let intentions = intentions_at(&doc, offset);
    assert_eq!(intentions.len(), 1);
    assert_eq!(&text[intentions[0].target().range()], "(x) -> x * 2");
    assert!(intentions[0].is_available(&doc));
}

#[test]
fn convert_all_rewrites_nested_lambdas_outermost_first() {
    let mut doc = Document::new("def add = (a) -> (b) -> a + b\nxs.each(x -> println(x))\n");
    let edits = convert_all(&mut doc).unwrap();
    assert_eq!(edits.len(), 3);
    assert_eq!(
        doc.text(),
        "def add = {a -> {b -> a + b}}\nxs.each({x -> println(x)})\n"
    );
    assert!(doc.parse_errors().is_empty(), "{:?}", doc.parse_errors());
}

#[test]
fn convert_all_skips_bodyless_lambdas() {
    let mut doc = Document::new("def a = (x) -> x\ndef b = (y) ->\n");
    let edits = convert_all(&mut doc).unwrap();
    assert_eq!(edits.len(), 1);
    assert_eq!(doc.text(), "def a = {x -> x}\ndef b = (y) ->\n");
}

/// A host whose replacement always fails, to check error propagation.
struct RejectingHost {
    doc: Document,
}

impl IntentionHost for RejectingHost {
    fn resolve_lambda(&self, ptr: &SyntaxNodePtr) -> Option<LambdaExpression> {
        self.doc.resolve_lambda(ptr)
    }

    fn replace_with_closure(
        &mut self,
        target: &LambdaExpression,
        _closure_text: &str,
    ) -> Result<TextEdit, ReplaceError> {
        Err(ReplaceError::Edit(gravel_core::EditError::RangeOutOfBounds {
            range: target.syntax().text_range(),
            text_len: TextSize::of(self.doc.text()),
        }))
    }
}

#[test]
fn replacement_errors_propagate() {
    let doc = Document::new("(x) -> x");
    let intention = intention_for_first_lambda(&doc);
    let mut host = RejectingHost { doc };
    assert!(matches!(
        intention.invoke(&mut host),
        Err(ReplaceError::Edit(_))
    ));
}

#[test]
fn closure_text_is_available_without_a_host() {
    let doc = Document::new("x -> x");
    let lambda = lambdas(&doc.syntax()).next().unwrap();
    assert_eq!(closure_text(&lambda).as_deref(), Some("{x -> x}"));
}
