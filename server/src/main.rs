//! Job Aggregator API Server
//!
//! Exposes the site scrapers over a REST API using Axum. Each request runs
//! one scrape on the blocking thread pool.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use clap::Parser;
use common::{JobResponse, Scraper, ScraperInput, Site, UnknownSite};
use linkedin_scraper::{LinkedInScraper, ScraperConfig, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Query parameters for the jobs endpoint
#[derive(Debug, Deserialize)]
struct JobsParams {
    /// Site name, `linkedin` when absent. Unknown names are answered with a
    /// failed response rather than a rejected query.
    site: Option<String>,
    search_term: String,
    #[serde(default)]
    location: String,
    distance: Option<u32>,
    results_wanted: Option<usize>,
}

impl JobsParams {
    fn into_input(self) -> ScraperInput {
        let mut input = ScraperInput::new(self.search_term, self.location);
        if let Some(distance) = self.distance {
            input.distance = distance;
        }
        if let Some(results_wanted) = self.results_wanted {
            input.results_wanted = results_wanted;
        }
        input
    }
}

/// Shared application state
struct AppState {
    scrapers: HashMap<Site, Arc<dyn Scraper>>,
}

impl AppState {
    fn new(scrapers: Vec<Arc<dyn Scraper>>) -> Self {
        Self {
            scrapers: scrapers
                .into_iter()
                .map(|scraper| (scraper.site(), scraper))
                .collect(),
        }
    }
}

/// Handler for GET /jobs?site=linkedin&search_term=<keywords>
async fn jobs_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JobsParams>,
) -> Json<JobResponse> {
    let site = match params.site.as_deref().map(str::parse::<Site>) {
        None => Site::default(),
        Some(Ok(site)) => site,
        Some(Err(e)) => {
            warn!(error = %e, "rejecting scrape for unknown site");
            return Json(JobResponse::failure(e.to_string(), Vec::new(), 0));
        }
    };
    let Some(scraper) = state.scrapers.get(&site).cloned() else {
        return Json(JobResponse::failure(
            UnknownSite(site.to_string()).to_string(),
            Vec::new(),
            0,
        ));
    };

    let input = params.into_input();
    info!(
        %site,
        search_term = %input.search_term,
        results_wanted = input.results_wanted,
        "scrape requested"
    );

    match tokio::task::spawn_blocking(move || scraper.scrape(&input)).await {
        Ok(response) => Json(response),
        Err(e) => {
            error!(%site, error = %e, "scrape task did not complete");
            Json(JobResponse::failure("scrape task did not complete", Vec::new(), 0))
        }
    }
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Aggregator API\n\nEndpoints:\n  GET /jobs?search_term=<keywords>&location=<place>&distance=<miles>&results_wanted=<n> - Scrape job postings\n\nExample:\n  curl 'http://127.0.0.1:3000/jobs?search_term=rust&location=Austin,%20TX'"
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/jobs", get(jobs_handler))
        .with_state(state)
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "REST API over the job board scrapers", long_about = None)]
struct CliArgs {
    /// Address to listen on.
    #[clap(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
    /// Override the LinkedIn job search base URL.
    #[clap(long)]
    base_url: Option<Url>,
    /// Request timeout in seconds for each page fetch.
    #[clap(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = CliArgs::parse();

    println!("🚀 Starting Job Aggregator Server...\n");

    let mut config = ScraperConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let state = Arc::new(AppState::new(vec![
        Arc::new(LinkedInScraper::new(config)) as Arc<dyn Scraper>,
    ]));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    println!("🌐 Server running at http://{}", args.addr);
    println!("   Try: curl 'http://{}/jobs?search_term=rust'\n", args.addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
