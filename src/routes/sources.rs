use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::job::JobListing;
use crate::search::SearchService;
use crate::sources::{PlaceholderReason, ProbeReport, ScrapeOutcome};

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_query() -> String {
    "java developer".to_string()
}

fn default_location() -> String {
    "remote".to_string()
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub source: String,
    pub placeholder_reason: Option<PlaceholderReason>,
    pub listings: Vec<JobListing>,
}

pub async fn list(State(service): State<SearchService>) -> Json<Vec<String>> {
    Json(service.source_names())
}

/// GET /sources/{name}/scrape
///
/// Runs a single source for inspection. Nothing is persisted.
pub async fn scrape(
    State(service): State<SearchService>,
    Path(name): Path<String>,
    Query(params): Query<ScrapeParams>,
) -> Result<Json<ScrapeResponse>, AppError> {
    for (field, value) in [("query", &params.query), ("location", &params.location)] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} must not be empty")));
        }
    }

    let outcome = service
        .scrape_source(&name, &params.query, &params.location)
        .await?;
    let placeholder_reason = match &outcome {
        ScrapeOutcome::Placeholder { reason, .. } => Some(*reason),
        _ => None,
    };
    let source = service
        .source_names()
        .into_iter()
        .find(|s| s.eq_ignore_ascii_case(&name))
        .unwrap_or(name);

    Ok(Json(ScrapeResponse {
        source,
        placeholder_reason,
        listings: outcome.into_listings(),
    }))
}

pub async fn probe(
    State(service): State<SearchService>,
    Path(name): Path<String>,
) -> Result<Json<ProbeReport>, AppError> {
    let report = service.probe_source(&name).await?;
    Ok(Json(report))
}
