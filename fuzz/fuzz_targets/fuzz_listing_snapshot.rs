#![no_main]
use libfuzzer_sys::fuzz_target;

use property_cache::domain::listing::Listing;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(listings) = serde_json::from_str::<Vec<Listing>>(text) {
            let _ = serde_json::to_string(&listings);
        }
    }
});
