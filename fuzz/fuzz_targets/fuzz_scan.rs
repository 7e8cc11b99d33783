#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for line in ahnen::LineScanner::new(text) {
            if line.is_err() {
                break;
            }
        }
    }
});
