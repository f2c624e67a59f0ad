#![no_main]

use gravel_intentions::{closure_text, convert_all, Document, ReplaceError};
use gravel_syntax::lambdas;
use libfuzzer_sys::fuzz_target;

#[path = "utils.rs"]
mod utils;

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let mut doc = Document::new(text);
    for lambda in lambdas(&doc.syntax()) {
        if let Some(closure) = closure_text(&lambda) {
            assert!(closure.starts_with('{') && closure.ends_with('}'));
        }
    }

    // Every edit targets the current text; only closure re-parse failures may surface.
    if let Err(err @ ReplaceError::Edit(_)) = convert_all(&mut doc) {
        panic!("convert_all produced an invalid edit: {err}");
    }
});
