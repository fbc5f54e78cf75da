// Job board sources.
// Each board is a `SourceProfile` (URL rule plus pattern chains); the
// selector-driven adapter turns a profile into a `JobSource`.

pub mod adapter;
pub mod builder;
pub mod fetch;
pub mod indeed;
pub mod linkedin;
pub mod placeholder;
pub mod selector;

#[cfg(test)]
pub mod testing;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::events::EventSink;
use crate::models::job::JobListing;
use adapter::{SelectorSource, SourceProfile};
use fetch::Fetch;
use selector::PatternError;

/// Trait that all job sources implement.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Display name, also stored as each listing's source.
    fn name(&self) -> &str;

    /// Run fetch, extract and build for one search. Never fails: problems
    /// are reported to `events` and answered with placeholder listings.
    async fn scrape(
        &self,
        fetcher: &dyn Fetch,
        events: &dyn EventSink,
        query: &str,
        location: &str,
    ) -> ScrapeOutcome;

    /// Single connectivity check against the board's front page.
    async fn probe(&self, fetcher: &dyn Fetch) -> ProbeReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    FetchFailed,
    NoContainers,
    AllDropped,
}

impl fmt::Display for PlaceholderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PlaceholderReason::FetchFailed => "fetch failed",
            PlaceholderReason::NoContainers => "no job containers matched",
            PlaceholderReason::AllDropped => "every fragment was dropped",
        };
        f.write_str(reason)
    }
}

/// What one source contributed to a search.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Scraped(Vec<JobListing>),
    Placeholder {
        reason: PlaceholderReason,
        listings: Vec<JobListing>,
    },
    /// The task itself died; contributes nothing to the merge.
    Failed { error: String },
}

impl ScrapeOutcome {
    pub fn into_listings(self) -> Vec<JobListing> {
        match self {
            ScrapeOutcome::Scraped(listings) => listings,
            ScrapeOutcome::Placeholder { listings, .. } => listings,
            ScrapeOutcome::Failed { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub source: String,
    pub url: String,
    pub reachable: bool,
    pub status: Option<u16>,
    pub page_title: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Built-in profile by name, case-insensitive.
pub fn builtin_profile(name: &str) -> Option<SourceProfile> {
    match name.trim().to_ascii_lowercase().as_str() {
        "indeed" => Some(indeed::profile()),
        "linkedin" => Some(linkedin::profile()),
        _ => None,
    }
}

/// Build the sources in the given order, which is also the merge order.
pub fn registry(names: &[String], timeout: Duration) -> Result<Vec<Arc<dyn JobSource>>, RegistryError> {
    names
        .iter()
        .map(|name| -> Result<Arc<dyn JobSource>, RegistryError> {
            let mut profile =
                builtin_profile(name).ok_or_else(|| RegistryError::UnknownSource(name.clone()))?;
            profile.request.timeout = timeout;
            let source: Arc<dyn JobSource> = Arc::new(SelectorSource::new(profile)?);
            Ok(source)
        })
        .collect()
}
