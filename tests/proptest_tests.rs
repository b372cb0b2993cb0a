use std::time::Duration;

use proptest::prelude::*;

use property_cache::adapters::cache::info::parse_info;
use property_cache::adapters::cache::memory_cache::MemoryCache;
use property_cache::domain::metrics::{CacheMetrics, hit_ratio};
use property_cache::ports::cache::CacheClient;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}

// ---------------------------------------------------------------------------
// Hit ratio
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ratio_is_a_percentage(hits in 0..1_000_000_000_u64, misses in 0..1_000_000_000_u64) {
        let ratio = hit_ratio(hits, misses);
        prop_assert!((0.0..=100.0).contains(&ratio));
    }

    #[test]
    fn ratio_has_at_most_two_decimals(hits in 0..100_000_u64, misses in 0..100_000_u64) {
        let ratio = hit_ratio(hits, misses);
        let scaled = ratio * 100.0;
        prop_assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn total_is_sum_of_counters(hits in 0..u64::MAX / 2, misses in 0..u64::MAX / 2) {
        let m = CacheMetrics::from_counters(hits, misses);
        prop_assert_eq!(m.total_requests, hits + misses);
        prop_assert!(m.error.is_none());
    }

    #[test]
    fn more_hits_never_lowers_ratio(hits in 0..10_000_u64, misses in 1..10_000_u64, extra in 1..1_000_u64) {
        prop_assert!(hit_ratio(hits + extra, misses) >= hit_ratio(hits, misses));
    }

    #[test]
    fn only_misses_is_zero(misses in 0..u64::MAX) {
        prop_assert!(hit_ratio(0, misses).abs() < f64::EPSILON);
    }
}

// ---------------------------------------------------------------------------
// INFO parsing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn parse_info_never_panics(raw in ".{0,500}") {
        let _ = parse_info(&raw);
    }

    #[test]
    fn parse_info_finds_counters_among_noise(
        hits in any::<u64>(),
        misses in any::<u64>(),
        noise in prop::collection::vec("[a-z_]{1,12}:[0-9a-z]{0,8}", 0..20),
    ) {
        let mut lines = vec!["# Stats".to_string()];
        lines.extend(noise.into_iter().filter(|l| !l.starts_with("keyspace_")));
        lines.push(format!("keyspace_hits:{hits}"));
        lines.push(format!("keyspace_misses:{misses}"));
        let raw = lines.join("\r\n");

        let info = parse_info(&raw);
        prop_assert_eq!(info.counter("keyspace_hits").unwrap(), hits);
        prop_assert_eq!(info.counter("keyspace_misses").unwrap(), misses);
    }
}

// ---------------------------------------------------------------------------
// In-process cache counters
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn memory_cache_counts_every_lookup(keys in prop::collection::vec("[a-d]", 0..50)) {
        let (hits, misses) = block_on(async {
            let cache = MemoryCache::new(16);
            cache.set("a", "1", Duration::from_secs(60)).await.unwrap();
            cache.set("b", "2", Duration::from_secs(60)).await.unwrap();
            for key in &keys {
                cache.get(key).await.unwrap();
            }
            let info = cache.info().await.unwrap();
            (
                info.counter("keyspace_hits").unwrap(),
                info.counter("keyspace_misses").unwrap(),
            )
        });

        let expected_hits = keys.iter().filter(|k| *k == "a" || *k == "b").count() as u64;
        prop_assert_eq!(hits, expected_hits);
        prop_assert_eq!(hits + misses, keys.len() as u64);
    }
}
