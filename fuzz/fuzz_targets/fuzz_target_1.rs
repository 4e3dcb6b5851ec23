#![no_main]
use libfuzzer_sys::fuzz_target;

use jsontree::{parse_json, Tokenizer};

fuzz_target!(|data: &[u8]| {
    // The tokenizer reads raw bytes line by line and rejects bad UTF-8
    // itself, so the fuzzer input can go in unfiltered.
    if let Ok(stream) = Tokenizer::new(data).with_max_line_len(256).tokenize() {
        // We are looking for panics (or stack overflows), so just run the
        // parser and print whatever it builds.
        if let Some(parsed) = parse_json(&stream) {
            let _ = parsed.node.to_string();
            let _ = parsed.remainder().map(|rest| rest.count());
        }
    }
});
