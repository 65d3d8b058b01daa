#![no_main]
use libfuzzer_sys::fuzz_target;
use zxml::{Config, EndTagMode};

fuzz_target!(|data: &[u8]| {
    let config = Config::default()
        .with_end_tags(EndTagMode::Strict)
        .with_max_depth(64);
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = zxml::parse_text_with_config(s, config);
    }
});
