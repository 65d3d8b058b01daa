#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = zxml::parse_bytes(data) {
        let nodes = doc.node_count();
        let _ = doc.find_tag("a", false);
        let _ = doc.find_by_path("a/b/c", true);
        assert_eq!(doc.destroy().nodes, nodes);
    }
});
