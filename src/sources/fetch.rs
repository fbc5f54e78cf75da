use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use scraper::{Html, Selector};

/// Headers and transport policy for requests to one source.
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub user_agent: String,
    pub accept_language: String,
    pub accept: Option<String>,
    pub referer: Option<String>,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl Default for RequestProfile {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            accept: None,
            referer: None,
            timeout: Duration::from_secs(10),
            follow_redirects: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

/// A successfully fetched page. Parse it with [`FetchedPage::document`];
/// the parsed tree is not `Send`, so parse only inside synchronous code.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Text of the `<title>` element, if any.
    pub fn title(&self) -> Option<String> {
        page_title(&self.document())
    }
}

pub fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| super::selector::normalize_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Single GET, no retry.
    async fn fetch(&self, url: &str, profile: &RequestProfile) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed fetcher. Redirect policy is fixed per client, so one client
/// is kept for each policy.
pub struct HttpFetcher {
    following: reqwest::Client,
    non_following: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let following = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let non_following = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            following,
            non_following,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, profile: &RequestProfile) -> Result<FetchedPage, FetchError> {
        let client = if profile.follow_redirects {
            &self.following
        } else {
            &self.non_following
        };

        let mut request = client
            .get(url)
            .timeout(profile.timeout)
            .header(USER_AGENT, &profile.user_agent)
            .header(ACCEPT_LANGUAGE, &profile.accept_language);
        if let Some(accept) = &profile.accept {
            request = request.header(ACCEPT, accept);
        }
        if let Some(referer) = &profile.referer {
            request = request.header(REFERER, referer);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| transport_error(url, profile.timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = resp.url().to_string();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(url, profile.timeout, e))?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_error(url: &str, timeout: Duration, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
