#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlaccess::serial::document;

fuzz_target!(|data: &[u8]| {
    // Parse -> serialize -> parse -> serialize must reach a fixed point
    let xml = xmlaccess::parse(data);
    if let Ok(first) = document(&xml) {
        let second = document(&xmlaccess::parse(&first)).expect("reparse of own output failed");
        assert_eq!(first, second);
    }
});
