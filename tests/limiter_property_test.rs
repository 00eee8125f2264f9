//! Property test: across randomized capacities and per-page latencies, the
//! number of in-flight fetches never exceeds the limiter's capacity, and
//! every page still resolves.

mod common;

use std::sync::Arc;

use common::InFlightFetcher;
use poi_harvest::{NoOpProgress, PageFetcher, run_query};
use proptest::prelude::*;
use tokio::sync::Semaphore;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    })]

    #[test]
    fn in_flight_fetches_never_exceed_capacity(
        cap in 1usize..8,
        delays_ms in prop::collection::vec(0u64..15, 1..24),
    ) {
        let total_pages = delays_ms.len() as u32;
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let (peak, outcome) = runtime.block_on(async {
            let fetcher = InFlightFetcher::new(delays_ms);
            let limiter = Arc::new(Semaphore::new(cap));
            let outcome = run_query(
                Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
                "probe",
                total_pages,
                limiter,
                &NoOpProgress,
            )
            .await;
            (fetcher.peak(), outcome)
        });

        prop_assert!(
            peak <= cap,
            "peak in-flight {} exceeded capacity {}",
            peak,
            cap
        );
        prop_assert_eq!(outcome.completed_pages, total_pages);
        prop_assert_eq!(outcome.skipped_pages, 0);
        prop_assert_eq!(outcome.total_records, total_pages as usize);
    }
}
