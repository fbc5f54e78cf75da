// Progress reporting for the scrape pipeline.
// The pipeline never logs directly; it reports to whatever sink it was given.

use crate::sources::PlaceholderReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    Fetching {
        source: String,
        url: String,
    },
    FetchFailed {
        source: String,
        error: String,
    },
    /// `url` is the final URL after redirects.
    PageLoaded {
        source: String,
        url: String,
        page_title: String,
    },
    /// No container pattern matched. `snippet` is the start of the page body.
    NoContainers {
        source: String,
        snippet: String,
    },
    FragmentDropped {
        source: String,
        reason: String,
    },
    Extracted {
        source: String,
        containers: usize,
        listings: usize,
    },
    PlaceholderUsed {
        source: String,
        reason: PlaceholderReason,
        count: usize,
    },
    TaskFailed {
        source: String,
        error: String,
    },
    Persisted {
        count: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Forwards every event to `tracing`.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::Fetching { source, url } => {
                tracing::info!("Scraping {source}: {url}");
            }
            ScrapeEvent::FetchFailed { source, error } => {
                tracing::warn!("Fetch failed for {source}: {error}");
            }
            ScrapeEvent::PageLoaded {
                source,
                url,
                page_title,
            } => {
                tracing::debug!("Connected to {source} ({url}), page title: {page_title:?}");
            }
            ScrapeEvent::NoContainers { source, snippet } => {
                tracing::warn!("No job containers found on {source}");
                tracing::debug!("{source} page starts with: {snippet}");
            }
            ScrapeEvent::FragmentDropped { source, reason } => {
                tracing::debug!("Dropped {source} fragment: {reason}");
            }
            ScrapeEvent::Extracted {
                source,
                containers,
                listings,
            } => {
                tracing::info!("{source}: {containers} containers, {listings} listings");
            }
            ScrapeEvent::PlaceholderUsed {
                source,
                reason,
                count,
            } => {
                tracing::warn!("{source}: generated {count} placeholder listings ({reason})");
            }
            ScrapeEvent::TaskFailed { source, error } => {
                tracing::error!("Scrape task for {source} failed: {error}");
            }
            ScrapeEvent::Persisted { count } => {
                tracing::info!("Persisted {count} listings");
            }
        }
    }
}

/// Drops every event.
pub struct DiscardSink;

impl EventSink for DiscardSink {
    fn emit(&self, _event: ScrapeEvent) {}
}

/// Keeps every event in memory, in emission order.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<ScrapeEvent>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn events(&self) -> Vec<ScrapeEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
impl EventSink for MemorySink {
    fn emit(&self, event: ScrapeEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
