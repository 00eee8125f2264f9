//! CLI entry point: harvest a primary place plus its sub-regions.
//!
//! ```text
//! POI_COOKIE='SUB=...; XSRF-TOKEN=...' poi-harvest [PLACE [SUB_REGION ...]]
//! ```
//!
//! Environment:
//! - `POI_COOKIE` (required): session cookie for the place search API.
//! - `POI_USER_AGENT`: client identity string (defaults to a desktop UA).
//! - `POI_PAGES`: pages per query.
//! - `POI_CONCURRENCY`: batch-wide concurrency cap.
//! - `POI_OUTPUT_DIR`: directory for the per-query CSV files.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use poi_harvest::{DEFAULT_USER_AGENT, HarvestConfig, StaticCredentials, harvest};

const DEFAULT_PLACE: &str = "上海";

/// Sub-regions used when the default place is harvested without an explicit
/// list on the command line.
const DEFAULT_SUB_REGIONS: &[&str] = &[
    "黄浦区", "徐汇区", "长宁区", "静安区", "普陀区", "虹口区", "杨浦区", "浦东新区", "闵行区",
    "宝山区", "嘉定区", "金山区", "松江区", "青浦区", "奉贤区", "崇明区",
];

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let primary_place = args.next().unwrap_or_else(|| DEFAULT_PLACE.to_string());
    let mut sub_regions: Vec<String> = args.collect();
    if sub_regions.is_empty() && primary_place == DEFAULT_PLACE {
        sub_regions = DEFAULT_SUB_REGIONS.iter().map(ToString::to_string).collect();
    }

    let cookie = std::env::var("POI_COOKIE")
        .context("POI_COOKIE must be set to a valid session cookie")?;
    let user_agent =
        std::env::var("POI_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

    let mut builder = HarvestConfig::builder(primary_place).sub_regions(sub_regions);
    if let Ok(pages) = std::env::var("POI_PAGES") {
        builder = builder.pages_per_query(pages.parse().context("POI_PAGES must be an integer")?);
    }
    if let Ok(cap) = std::env::var("POI_CONCURRENCY") {
        builder =
            builder.concurrency_cap(cap.parse().context("POI_CONCURRENCY must be an integer")?);
    }
    if let Ok(dir) = std::env::var("POI_OUTPUT_DIR") {
        builder = builder.output_dir(dir);
    }
    let config = builder.build()?;

    let credentials = Arc::new(StaticCredentials::new(&cookie, &user_agent)?);
    let reports = harvest(config, credentials).await?;

    let mut failed = 0usize;
    for report in &reports {
        match &report.result {
            Ok(outcome) => info!(
                "{}: {} places ({} pages done, {} skipped)",
                report.query, outcome.total_records, outcome.completed_pages, outcome.skipped_pages
            ),
            Err(err) => {
                failed += 1;
                warn!("{}: failed: {err}", report.query);
            }
        }
    }

    if failed == reports.len() {
        bail!("every query failed");
    }
    Ok(())
}
