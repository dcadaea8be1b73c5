#![no_main]

use libfuzzer_sys::fuzz_target;
use plotify_search::utils::{MIN_TERM_LENGTH, tokenize};

fuzz_target!(|data: &str| {
    // Any string tokenizes into lowercase ASCII alphanumeric terms
    for term in tokenize(Some(data)) {
        assert!(term.len() >= MIN_TERM_LENGTH);
        assert!(term.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }
});
