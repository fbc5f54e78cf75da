use scraper::ElementRef;

use super::selector::{PatternChain, extract_attr, extract_field, resolve_link};
use crate::models::job::JobListing;

pub const DEFAULT_COMPANY: &str = "Company Not Listed";
pub const DEFAULT_DESCRIPTION: &str = "Visit job posting for full description";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionDrop {
    #[error("fragment has no title")]
    MissingTitle,
}

/// Compiled pattern chains for every field of a listing.
#[derive(Debug, Clone, Default)]
pub struct FieldPatterns {
    pub title: PatternChain,
    pub company: PatternChain,
    pub location: PatternChain,
    pub description: PatternChain,
    pub link: PatternChain,
}

/// Canonical job page built from an identifier attribute on the fragment,
/// used when the fragment carries no link.
#[derive(Debug, Clone, Copy)]
pub struct ViewJobRule {
    pub attribute: &'static str,
    pub path: &'static str,
}

/// Builds listings for one source and one search.
pub struct ListingBuilder<'a> {
    pub source: &'a str,
    pub origin: &'a str,
    pub fields: &'a FieldPatterns,
    pub view_job: Option<ViewJobRule>,
    /// Location the search was issued for.
    pub location: &'a str,
    /// Generic search URL for the query.
    pub fallback_url: &'a str,
}

impl ListingBuilder<'_> {
    pub fn build(&self, fragment: ElementRef<'_>) -> Result<JobListing, ExtractionDrop> {
        let title = extract_field(fragment, &self.fields.title);
        if title.is_empty() {
            return Err(ExtractionDrop::MissingTitle);
        }

        let company = extract_field(fragment, &self.fields.company);
        let location = extract_field(fragment, &self.fields.location);
        let description = extract_field(fragment, &self.fields.description);
        let url = self.listing_url(fragment);

        Ok(JobListing {
            title,
            company: or_default(company, DEFAULT_COMPANY),
            location: or_default(location, self.location),
            description: or_default(description, DEFAULT_DESCRIPTION),
            url: or_default(url, self.fallback_url),
            source: self.source.to_string(),
            placeholder: false,
        })
    }

    fn listing_url(&self, fragment: ElementRef<'_>) -> String {
        if let Some(href) = extract_attr(fragment, &self.fields.link, "href") {
            return resolve_link(&href, self.origin);
        }

        self.view_job
            .and_then(|rule| {
                fragment
                    .value()
                    .attr(rule.attribute)
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(|id| format!("{}{}{id}", self.origin, rule.path))
            })
            .unwrap_or_default()
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
