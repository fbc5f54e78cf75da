// Shared fixtures for source and search tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;

use super::adapter::{SearchUrlRule, SelectorSet, SourceProfile, SpaceEncoding};
use super::fetch::{Fetch, FetchError, FetchedPage, RequestProfile};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn test_profile(origin: String) -> SourceProfile {
    named_profile("Test", origin)
}

pub fn named_profile(name: &'static str, origin: String) -> SourceProfile {
    SourceProfile {
        name,
        origin,
        search: SearchUrlRule {
            path: "/search?",
            keyword_param: "q",
            location_param: "l",
            spaces: SpaceEncoding::Plus,
        },
        selectors: SelectorSet {
            containers: &["li.job"],
            title: &["h3.title"],
            company: &["span.company"],
            location: &["span.location"],
            description: &["p.summary"],
            link: &["a"],
        },
        view_job: None,
        request: RequestProfile::default(),
    }
}

#[derive(Debug, Clone)]
pub enum StaticResponse {
    Page(String),
    Status(u16),
    Timeout,
}

struct Route {
    prefix: String,
    response: StaticResponse,
    delay: Duration,
}

/// Fetcher answering from canned responses chosen by URL prefix.
/// Unmatched URLs get a 404.
#[derive(Default)]
pub struct StaticFetcher {
    routes: Vec<Route>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn page(body: &str) -> Self {
        Self::default().route("", StaticResponse::Page(body.to_string()))
    }

    pub fn status(status: u16) -> Self {
        Self::default().route("", StaticResponse::Status(status))
    }

    pub fn route(self, prefix: &str, response: StaticResponse) -> Self {
        self.delayed_route(prefix, response, Duration::ZERO)
    }

    pub fn delayed_route(mut self, prefix: &str, response: StaticResponse, delay: Duration) -> Self {
        self.routes.push(Route {
            prefix: prefix.to_string(),
            response,
            delay,
        });
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &str, profile: &RequestProfile) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());

        let Some(route) = self.routes.iter().find(|r| url.starts_with(&r.prefix)) else {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        };
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match &route.response {
            StaticResponse::Page(body) => Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            StaticResponse::Status(status) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            StaticResponse::Timeout => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: profile.timeout,
            }),
        }
    }
}
