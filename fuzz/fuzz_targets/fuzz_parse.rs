#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlaccess::parser::{parse_with_options, ParseOptions, TextTrimming};

fuzz_target!(|data: &[u8]| {
    // Default options: should never panic
    let xml = xmlaccess::parse(data);
    let _ = xml.children().names();
    // Namespace stripping and trimming: should never panic
    let opts = ParseOptions::default()
        .ignore_namespaces(true)
        .trimming(TextTrimming::WhitespaceAndNewlines);
    let _ = parse_with_options(data, &opts).to_string();
});
