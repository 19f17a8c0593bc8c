#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz lock document extraction - this should never panic
        let tracked = vec!["http".to_string(), "dio".to_string()];
        let _ = pubdiff::extract(content, &tracked);
    }
});
