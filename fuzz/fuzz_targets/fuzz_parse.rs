#![no_main]

use libfuzzer_sys::fuzz_target;

#[path = "utils.rs"]
mod utils;

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let parse = gravel_syntax::parse(text);
    assert_eq!(parse.syntax().to_string(), text, "parse must be lossless");
    let _ = gravel_syntax::parse_closure(text);
});
