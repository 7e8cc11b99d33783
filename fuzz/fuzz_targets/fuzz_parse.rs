#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = ahnen::Document::from_slice(data) {
        // canonical output of a parsed document must reparse to the same tree
        let out = doc.serialize().unwrap();
        let reparsed = ahnen::Document::parse(&out).unwrap();
        assert_eq!(doc.nodes(), reparsed.nodes());
    }
});
