//! MRP Jobs Server
//!
//! Serves the records written by the collectors as a read-only REST API with
//! full-text search over titles, companies, locations, descriptions and
//! requirements.

mod config;
mod search;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use common::{CompanyInfo, JobRecord, Posting};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ServerConfig;
use crate::search::{JobIndex, SearchResponse};

const SEARCH_LIMIT: usize = 10;

/// Query parameters for search endpoint
#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Shared application state
struct AppState {
    jobs: Vec<JobRecord>,
    postings: Vec<Posting>,
    company: Option<CompanyInfo>,
    index: JobIndex,
}

/// Reads a JSON list written by a collector. A missing file is an empty list.
fn load_list<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "file not found; run the matching collector first");
        return Ok(vec![]);
    }
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_company(path: &Path) -> anyhow::Result<Option<CompanyInfo>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    // The extractor writes `{}` when it had no records
    if value.as_object().is_some_and(|map| map.is_empty()) {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Handler for GET /search?q=<keywords>
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query = params.q.unwrap_or_default();
    Json(state.index.search(&query, SEARCH_LIMIT))
}

/// Handler for GET /jobs
async fn jobs_handler(State(state): State<Arc<AppState>>) -> Json<Vec<JobRecord>> {
    Json(state.jobs.clone())
}

/// Handler for GET /postings
async fn postings_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Posting>> {
    Json(state.postings.clone())
}

/// Handler for GET /company
async fn company_handler(State(state): State<Arc<AppState>>) -> Result<Json<CompanyInfo>, StatusCode> {
    state.company.clone().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 MRP Jobs API\n\nEndpoints:\n  GET /jobs - All collected jobs\n  GET /postings - Careers-site postings from ADP\n  GET /company - Company profile\n  GET /search?q=<keywords> - Search for jobs\n\nExample:\n  curl 'http://127.0.0.1:3000/search?q=supply chain'"
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/jobs", get(jobs_handler))
        .route("/postings", get(postings_handler))
        .route("/company", get(company_handler))
        .route("/search", get(search_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logging::init();
    tracing::info!("Starting MRP Jobs Server");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    let jobs: Vec<JobRecord> = load_list(&config.jobs_path())?;
    let postings: Vec<Posting> = load_list(&config.postings_path())?;
    let company = load_company(&config.company_path())?;
    tracing::info!(
        jobs = jobs.len(),
        postings = postings.len(),
        company = company.is_some(),
        "data loaded"
    );

    let index = JobIndex::build(&jobs).context("Failed to create search index")?;
    let state = Arc::new(AppState {
        jobs,
        postings,
        company,
        index,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
