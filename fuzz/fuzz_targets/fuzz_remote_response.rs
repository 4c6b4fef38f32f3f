#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the remote analysis parser.
///
/// Feeds arbitrary UTF-8 strings to `parse_analysis_content`, the only
/// place untrusted model output enters the crate.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = archscale::source::parse_analysis_content(s);
    }
});
