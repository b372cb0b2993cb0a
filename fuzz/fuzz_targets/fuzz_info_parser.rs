#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let info = property_cache::adapters::cache::info::parse_info(raw);
        let _ = info.counter("keyspace_hits");
        let _ = info.counter("keyspace_misses");
    }
});
