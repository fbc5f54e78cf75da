use axum::Json;
use axum::extract::{Path, Query, State};

use crate::error::AppError;
use crate::models::job::{Job, JobSearchQuery};
use crate::search::SearchService;

pub async fn list(State(service): State<SearchService>) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = service.list_all().await?;
    Ok(Json(jobs))
}

/// GET /jobs/search?query&location
///
/// Both parameters scrape every source and persist the results; a query
/// alone filters stored jobs; neither returns everything.
pub async fn search(
    State(service): State<SearchService>,
    Query(params): Query<JobSearchQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = service.search(&params).await?;
    Ok(Json(jobs))
}

pub async fn delete(
    State(service): State<SearchService>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    service.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
