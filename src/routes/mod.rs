pub mod jobs;
pub mod sources;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};

use crate::search::SearchService;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz(State(service): State<SearchService>) -> impl IntoResponse {
    match service.ping_store().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready"),
    }
}

pub fn router(service: SearchService) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Jobs
        .route("/jobs", get(jobs::list))
        .route("/jobs/search", get(jobs::search))
        .route("/jobs/{id}", delete(jobs::delete))
        // Sources
        .route("/sources", get(sources::list))
        .route("/sources/{name}/scrape", get(sources::scrape))
        .route("/sources/{name}/probe", get(sources::probe))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::events::DiscardSink;
    use crate::models::job::JobListing;
    use crate::sources::JobSource;
    use crate::sources::adapter::SelectorSource;
    use crate::sources::testing::{StaticFetcher, StaticResponse, named_profile};
    use crate::store::{JobStore, MemoryJobStore};

    async fn app() -> Router {
        let store = Arc::new(MemoryJobStore::new());
        store
            .save_all(&[JobListing {
                title: "Java Developer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                description: "Spring".to_string(),
                url: "https://example.com/1".to_string(),
                source: "Indeed".to_string(),
                placeholder: false,
            }])
            .await
            .unwrap();
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(
            SelectorSource::new(named_profile("Alpha", "http://alpha.test".to_string())).unwrap(),
        )];
        let fetcher = StaticFetcher::default().route(
            "http://alpha.test/search",
            StaticResponse::Page(
                r#"<li class="job"><h3 class="title">Scraped Role</h3></li>"#.to_string(),
            ),
        );
        router(SearchService::new(
            sources,
            Arc::new(fetcher),
            store,
            Arc::new(DiscardSink),
        ))
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn list_returns_stored_jobs() {
        let (status, body) = call(app().await, Method::GET, "/jobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["title"], "Java Developer");
        assert_eq!(body[0]["placeholder"], false);
    }

    #[tokio::test]
    async fn search_with_query_only_filters_store() {
        let (status, body) = call(app().await, Method::GET, "/jobs/search?query=JAVA").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = call(app().await, Method::GET, "/jobs/search?query=python").await;
        assert_eq!(body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn search_with_both_parameters_scrapes_and_persists() {
        let app = app().await;
        let (status, body) = call(
            app.clone(),
            Method::GET,
            "/jobs/search?query=rust%20dev&location=remote",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Scraped Role");
        assert_eq!(body[0]["id"], 2);

        let (_, all) = call(app, Method::GET, "/jobs").await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_job_is_404() {
        let app = app().await;
        let (status, _) = call(app.clone(), Method::DELETE, "/jobs/1").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(app, Method::DELETE, "/jobs/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job 1 not found");
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn scrape_endpoint_does_not_persist() {
        let app = app().await;
        let (status, body) = call(app.clone(), Method::GET, "/sources/alpha/scrape").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "Alpha");
        assert_eq!(body["placeholder_reason"], Value::Null);
        assert_eq!(body["listings"][0]["title"], "Scraped Role");

        let (_, all) = call(app, Method::GET, "/jobs").await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sources_and_health() {
        let (status, body) = call(app().await, Method::GET, "/sources").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["Alpha"]));

        let (status, _) = call(app().await, Method::GET, "/readyz").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(app().await, Method::GET, "/sources/nope/probe").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "unknown_source");
    }

    #[tokio::test]
    async fn scrape_endpoint_rejects_blank_parameters() {
        let (status, body) = call(app().await, Method::GET, "/sources/alpha/scrape?query=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
        assert_eq!(body["error"], "query must not be empty");

        let (status, _) = call(app().await, Method::GET, "/sources/alpha/scrape?location=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
