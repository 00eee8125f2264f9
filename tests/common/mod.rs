//! Test utilities and helper fetchers for the poi-harvest test suite

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use poi_harvest::{FetchError, PageFetcher, PageResult, PlaceRecord};

/// Builds a record with deterministic coordinates derived from the id.
#[allow(dead_code)]
pub fn place(id: &str, title: &str) -> PlaceRecord {
    let seed = id.bytes().map(usize::from).sum::<usize>() as f64;
    PlaceRecord {
        id: id.to_string(),
        title: title.to_string(),
        latitude: 31.0 + seed / 1000.0,
        longitude: 121.0 + seed / 1000.0,
    }
}

/// Builds the wire payload body for a page of pois.
#[allow(dead_code)]
pub fn poi_body(entries: &[(&str, &str, f64, f64)]) -> String {
    let pois: Vec<_> = entries
        .iter()
        .map(|(id, title, lat, lon)| {
            serde_json::json!({ "poiid": id, "title": title, "lat": lat, "lon": lon })
        })
        .collect();
    serde_json::json!({ "data": { "pois": pois } }).to_string()
}

/// Fetcher driven by a closure, for scripting per-page behavior in tests.
#[allow(dead_code)]
pub struct FnFetcher<F>(pub F);

#[async_trait]
impl<F> PageFetcher for FnFetcher<F>
where
    F: Fn(&str, u32) -> Result<PageResult, FetchError> + Send + Sync,
{
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError> {
        (self.0)(query, page)
    }
}

/// Fetcher that records the order fetches start in and the peak number of
/// simultaneously in-flight calls, with a configurable per-page delay.
///
/// Returns one record per page, id `{query}-p{page}`.
#[allow(dead_code)]
pub struct InFlightFetcher {
    delays_ms: Vec<u64>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    started: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl InFlightFetcher {
    pub fn new(delays_ms: Vec<u64>) -> Arc<Self> {
        Arc::new(Self {
            delays_ms,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
        })
    }

    /// Number of pages this fetcher has a scripted delay for.
    pub fn pages(&self) -> u32 {
        self.delays_ms.len() as u32
    }

    /// Highest number of fetches ever in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Queries in the order their fetches began.
    pub fn started_queries(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for InFlightFetcher {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.started.lock().unwrap().push(query.to_string());

        let delay = self
            .delays_ms
            .get((page - 1) as usize)
            .copied()
            .unwrap_or(1);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(PageResult::new(vec![place(
            &format!("{query}-p{page}"),
            query,
        )]))
    }
}
