use std::sync::Arc;

use crate::error::AppError;
use crate::events::{EventSink, ScrapeEvent};
use crate::models::job::{Job, JobSearchQuery, SearchMode};
use crate::sources::fetch::Fetch;
use crate::sources::{JobSource, ProbeReport, ScrapeOutcome};
use crate::store::JobStore;

/// Runs searches across every registered source and keeps the results.
#[derive(Clone)]
pub struct SearchService {
    sources: Vec<Arc<dyn JobSource>>,
    fetcher: Arc<dyn Fetch>,
    store: Arc<dyn JobStore>,
    events: Arc<dyn EventSink>,
}

impl SearchService {
    pub fn new(
        sources: Vec<Arc<dyn JobSource>>,
        fetcher: Arc<dyn Fetch>,
        store: Arc<dyn JobStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            store,
            events,
        }
    }

    /// Source names in registration (and merge) order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    fn source(&self, name: &str) -> Result<&Arc<dyn JobSource>, AppError> {
        self.sources
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::UnknownSource(name.to_string()))
    }

    /// Caller-facing dispatch: scrape when both parameters are present,
    /// keyword filter when only the query is, everything otherwise.
    pub async fn search(&self, request: &JobSearchQuery) -> Result<Vec<Job>, AppError> {
        match request.mode() {
            SearchMode::Scrape { query, location } => self.search_jobs(&query, &location).await,
            SearchMode::Stored { keyword } => self.search_stored(&keyword).await,
            SearchMode::All => self.list_all().await,
        }
    }

    /// Scrape every source concurrently, wait for all of them, merge in
    /// registration order and persist the batch in one write.
    pub async fn search_jobs(&self, query: &str, location: &str) -> Result<Vec<Job>, AppError> {
        let merged: Vec<_> = self
            .scrape_all(query, location)
            .await
            .into_iter()
            .flat_map(ScrapeOutcome::into_listings)
            .collect();

        let saved = self.store.save_all(&merged).await?;
        self.events.emit(ScrapeEvent::Persisted { count: saved.len() });
        Ok(saved)
    }

    /// One outcome per source, in registration order regardless of which
    /// task finished first.
    pub async fn scrape_all(&self, query: &str, location: &str) -> Vec<ScrapeOutcome> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let fetcher = Arc::clone(&self.fetcher);
                let events = Arc::clone(&self.events);
                let query = query.to_string();
                let location = location.to_string();
                tokio::spawn(async move {
                    source
                        .scrape(fetcher.as_ref(), events.as_ref(), &query, &location)
                        .await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (source, handle) in self.sources.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let error = e.to_string();
                    self.events.emit(ScrapeEvent::TaskFailed {
                        source: source.name().to_string(),
                        error: error.clone(),
                    });
                    ScrapeOutcome::Failed { error }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Run one source without persisting anything.
    pub async fn scrape_source(
        &self,
        name: &str,
        query: &str,
        location: &str,
    ) -> Result<ScrapeOutcome, AppError> {
        let source = self.source(name)?;
        Ok(source
            .scrape(self.fetcher.as_ref(), self.events.as_ref(), query, location)
            .await)
    }

    pub async fn probe_source(&self, name: &str) -> Result<ProbeReport, AppError> {
        let source = self.source(name)?;
        Ok(source.probe(self.fetcher.as_ref()).await)
    }

    /// Case-insensitive keyword match over stored title, description and
    /// company. An empty keyword matches everything.
    pub async fn search_stored(&self, keyword: &str) -> Result<Vec<Job>, AppError> {
        let jobs = self.store.find_all().await?;
        if keyword.is_empty() {
            return Ok(jobs);
        }
        let needle = keyword.to_lowercase();
        Ok(jobs
            .into_iter()
            .filter(|job| job.listing.matches_keyword(&needle))
            .collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Job>, AppError> {
        self.store.find_all().await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
