use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scraper::Html;

use super::builder::{ExtractionDrop, FieldPatterns, ListingBuilder, ViewJobRule};
use super::fetch::{Fetch, FetchError, RequestProfile, page_title};
use super::placeholder;
use super::selector::{PatternChain, PatternError};
use super::{JobSource, PlaceholderReason, ProbeReport, ScrapeOutcome};
use crate::events::{EventSink, ScrapeEvent};
use crate::models::job::JobListing;

/// RFC 3986 unreserved characters stay as they are; everything else is encoded.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters of the page body reported when no container matched.
const SNIPPET_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceEncoding {
    /// `java developer` -> `java+developer`
    Plus,
    /// `java developer` -> `java%20developer`
    Percent,
}

impl SpaceEncoding {
    pub fn encode(self, value: &str) -> String {
        let encoded = utf8_percent_encode(value, COMPONENT_SET).to_string();
        match self {
            SpaceEncoding::Plus => encoded.replace("%20", "+"),
            SpaceEncoding::Percent => encoded,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchUrlRule {
    /// Path and the `?` separator, e.g. `/jobs?`.
    pub path: &'static str,
    pub keyword_param: &'static str,
    pub location_param: &'static str,
    pub spaces: SpaceEncoding,
}

/// Raw CSS pattern lists, in preference order.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub containers: &'static [&'static str],
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub description: &'static [&'static str],
    pub link: &'static [&'static str],
}

/// Everything that differs between job boards.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    pub name: &'static str,
    pub origin: String,
    pub search: SearchUrlRule,
    pub selectors: SelectorSet,
    pub view_job: Option<ViewJobRule>,
    pub request: RequestProfile,
}

/// Outcome of running the pattern chains over one page.
#[derive(Debug, Default)]
pub struct Extraction {
    pub page_title: Option<String>,
    pub containers: usize,
    pub listings: Vec<JobListing>,
    pub dropped: Vec<ExtractionDrop>,
    pub snippet: String,
}

/// A job board driven entirely by its [`SourceProfile`].
pub struct SelectorSource {
    profile: SourceProfile,
    containers: PatternChain,
    fields: FieldPatterns,
}

impl SelectorSource {
    pub fn new(profile: SourceProfile) -> Result<Self, PatternError> {
        let sel = &profile.selectors;
        let containers = PatternChain::parse(sel.containers)?;
        let fields = FieldPatterns {
            title: PatternChain::parse(sel.title)?,
            company: PatternChain::parse(sel.company)?,
            location: PatternChain::parse(sel.location)?,
            description: PatternChain::parse(sel.description)?,
            link: PatternChain::parse(sel.link)?,
        };
        Ok(Self {
            profile,
            containers,
            fields,
        })
    }

    pub fn search_url(&self, query: &str, location: &str) -> String {
        let rule = &self.profile.search;
        format!(
            "{}{}{}={}&{}={}",
            self.profile.origin,
            rule.path,
            rule.keyword_param,
            rule.spaces.encode(query),
            rule.location_param,
            rule.spaces.encode(location)
        )
    }

    /// Generic search page for a query, without a location.
    pub fn query_url(&self, query: &str) -> String {
        let rule = &self.profile.search;
        format!(
            "{}{}{}={}",
            self.profile.origin,
            rule.path,
            rule.keyword_param,
            rule.spaces.encode(query)
        )
    }

    pub fn extract(&self, body: &str, query: &str, location: &str) -> Extraction {
        let document = Html::parse_document(body);
        let fragments = self.containers.select_all(&document);
        let fallback_url = self.query_url(query);
        let builder = ListingBuilder {
            source: self.profile.name,
            origin: &self.profile.origin,
            fields: &self.fields,
            view_job: self.profile.view_job,
            location,
            fallback_url: &fallback_url,
        };

        let mut extraction = Extraction {
            page_title: page_title(&document),
            containers: fragments.len(),
            ..Extraction::default()
        };
        if fragments.is_empty() {
            extraction.snippet = body.chars().take(SNIPPET_CHARS).collect();
        }

        for fragment in fragments {
            match builder.build(fragment) {
                Ok(listing) => extraction.listings.push(listing),
                Err(drop) => extraction.dropped.push(drop),
            }
        }
        extraction
    }

    fn placeholders(
        &self,
        events: &dyn EventSink,
        reason: PlaceholderReason,
        query: &str,
        location: &str,
    ) -> ScrapeOutcome {
        let listings = placeholder::generate(
            query,
            location,
            self.profile.name,
            &self.query_url(query),
            placeholder::DEFAULT_COUNT,
        );
        events.emit(ScrapeEvent::PlaceholderUsed {
            source: self.profile.name.to_string(),
            reason,
            count: listings.len(),
        });
        ScrapeOutcome::Placeholder { reason, listings }
    }
}

#[async_trait]
impl JobSource for SelectorSource {
    fn name(&self) -> &str {
        self.profile.name
    }

    async fn scrape(
        &self,
        fetcher: &dyn Fetch,
        events: &dyn EventSink,
        query: &str,
        location: &str,
    ) -> ScrapeOutcome {
        let source = self.profile.name.to_string();
        let url = self.search_url(query, location);
        events.emit(ScrapeEvent::Fetching {
            source: source.clone(),
            url: url.clone(),
        });

        let page = match fetcher.fetch(&url, &self.profile.request).await {
            Ok(page) => page,
            Err(e) => {
                events.emit(ScrapeEvent::FetchFailed {
                    source,
                    error: e.to_string(),
                });
                return self.placeholders(events, PlaceholderReason::FetchFailed, query, location);
            }
        };

        let extraction = self.extract(&page.body, query, location);
        if let Some(page_title) = extraction.page_title {
            events.emit(ScrapeEvent::PageLoaded {
                source: source.clone(),
                url: page.url.clone(),
                page_title,
            });
        }

        if extraction.containers == 0 {
            events.emit(ScrapeEvent::NoContainers {
                source,
                snippet: extraction.snippet,
            });
            return self.placeholders(events, PlaceholderReason::NoContainers, query, location);
        }

        for drop in &extraction.dropped {
            events.emit(ScrapeEvent::FragmentDropped {
                source: source.clone(),
                reason: drop.to_string(),
            });
        }
        events.emit(ScrapeEvent::Extracted {
            source,
            containers: extraction.containers,
            listings: extraction.listings.len(),
        });

        if extraction.listings.is_empty() {
            return self.placeholders(events, PlaceholderReason::AllDropped, query, location);
        }
        ScrapeOutcome::Scraped(extraction.listings)
    }

    async fn probe(&self, fetcher: &dyn Fetch) -> ProbeReport {
        let url = format!("{}/", self.profile.origin);
        let result = fetcher.fetch(&url, &self.profile.request).await;
        let mut report = ProbeReport {
            source: self.profile.name.to_string(),
            url,
            reachable: false,
            status: None,
            page_title: None,
            error: None,
        };
        match result {
            Ok(page) => {
                report.reachable = true;
                report.status = Some(page.status);
                report.page_title = page.title();
            }
            Err(e) => {
                if let FetchError::HttpStatus { status, .. } = &e {
                    report.status = Some(*status);
                }
                report.error = Some(e.to_string());
            }
        }
        report
    }
}
