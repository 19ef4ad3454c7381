//! LinkedIn Job Scraper
//!
//! Walks LinkedIn's public job search page by page and turns the listing
//! cards into [`common::JobPost`] records.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod location;
pub mod paginate;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use reqwest::Url;

use common::{JobResponse, Scraper, ScraperInput, Site};
use fetch::HttpFetcher;

/// Scraper for LinkedIn. Holds configuration only; every call to
/// [`Scraper::scrape`] opens and closes its own HTTP client.
#[derive(Debug, Clone, Default)]
pub struct LinkedInScraper {
    config: ScraperConfig,
}

impl LinkedInScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }
}

impl Scraper for LinkedInScraper {
    fn site(&self) -> Site {
        Site::LinkedIn
    }

    fn scrape(&self, input: &ScraperInput) -> JobResponse {
        let fetcher = match HttpFetcher::new(&self.config) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                tracing::error!(error = %e, "could not set up HTTP client");
                return JobResponse::failure(e.to_string(), Vec::new(), 0);
            }
        };
        paginate::run(&fetcher, &self.config.base_url, input)
    }
}
