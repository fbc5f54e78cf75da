use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One job posting as produced by a source, before it is persisted.
///
/// `title` is never empty: fragments without a title are dropped before a
/// listing is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source: String,
    /// Synthetic listing generated because the source produced nothing usable.
    pub placeholder: bool,
}

impl JobListing {
    /// Case-insensitive substring match against title, description and company.
    /// `needle` must already be lowercased.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.company.to_lowercase().contains(needle)
    }
}

/// A listing as stored, with its store-assigned id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: JobListing,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobSearchQuery {
    pub query: Option<String>,
    pub location: Option<String>,
}

/// Which path a caller-facing search takes.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Scrape every source fresh and persist the merged batch.
    Scrape { query: String, location: String },
    /// Keyword filter over stored listings only.
    Stored { keyword: String },
    /// Everything in the store.
    All,
}

impl JobSearchQuery {
    pub fn mode(&self) -> SearchMode {
        let query = non_empty(&self.query);
        let location = non_empty(&self.location);
        match (query, location) {
            (Some(query), Some(location)) => SearchMode::Scrape {
                query: query.to_string(),
                location: location.to_string(),
            },
            (Some(keyword), None) => SearchMode::Stored {
                keyword: keyword.to_string(),
            },
            _ => SearchMode::All,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, company: &str, description: &str) -> JobListing {
        JobListing {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            url: "https://example.com/job".to_string(),
            source: "Indeed".to_string(),
            placeholder: false,
        }
    }

    #[test]
    fn keyword_matches_any_searchable_field() {
        assert!(listing("Java Developer", "Acme", "").matches_keyword("java"));
        assert!(listing("Engineer", "JavaSoft", "").matches_keyword("java"));
        assert!(listing("Engineer", "Acme", "Work with JAVA daily").matches_keyword("java"));
    }

    #[test]
    fn keyword_ignores_location_and_url() {
        let mut job = listing("Engineer", "Acme", "Rust services");
        job.location = "Java, Indonesia".to_string();
        job.url = "https://java.example.com".to_string();
        assert!(!job.matches_keyword("java"));
    }

    #[test]
    fn mode_requires_both_parameters_to_scrape() {
        let q = JobSearchQuery {
            query: Some("rust".to_string()),
            location: Some("Berlin".to_string()),
        };
        assert_eq!(
            q.mode(),
            SearchMode::Scrape {
                query: "rust".to_string(),
                location: "Berlin".to_string()
            }
        );
    }

    #[test]
    fn mode_with_query_only_filters_store() {
        let q = JobSearchQuery {
            query: Some("rust".to_string()),
            location: Some(String::new()),
        };
        assert_eq!(
            q.mode(),
            SearchMode::Stored {
                keyword: "rust".to_string()
            }
        );
    }

    #[test]
    fn mode_without_query_returns_everything() {
        let q = JobSearchQuery {
            query: None,
            location: Some("Berlin".to_string()),
        };
        assert_eq!(q.mode(), SearchMode::All);
        assert_eq!(JobSearchQuery::default().mode(), SearchMode::All);
    }
}
