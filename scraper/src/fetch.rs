//! Page transport.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Url;

/// Raw answer for one search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Fetches one search page. A non-200 status is not an error here; the
/// caller decides what to do with it.
pub trait PageFetcher {
    fn fetch(&self, url: &Url, query: &[(&str, String)]) -> Result<FetchedPage, ScrapeError>;
}

/// Builds the search URL `<base>/<search_term>-jobs`.
///
/// Always starts from `base`, so calling it once per page never stacks path
/// segments.
pub fn search_url(base: &Url, search_term: &str) -> Result<Url, ScrapeError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ScrapeError::BaseUrl(base.to_string()))?
        .pop_if_empty()
        .push(&format!("{search_term}-jobs"));
    Ok(url)
}

/// reqwest-backed fetcher. Lives for a single scrape, dropping it closes the
/// pooled connections.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url, query: &[(&str, String)]) -> Result<FetchedPage, ScrapeError> {
        let request_error = |source| ScrapeError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .map_err(request_error)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(request_error)?;

        tracing::debug!(%url, status, bytes = body.len(), "fetched search page");
        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    fn query(page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("pageNum", page.to_string()),
            ("location", "Austin".to_string()),
            ("distance", "25".to_string()),
        ]
    }

    #[test]
    fn test_search_url_appends_term() {
        let base = Url::parse("https://www.linkedin.com/jobs").unwrap();
        let url = search_url(&base, "rust").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/jobs/rust-jobs");
    }

    #[test]
    fn test_search_url_is_stable_across_pages() {
        let base = Url::parse("https://www.linkedin.com/jobs/").unwrap();
        let first = search_url(&base, "rust").unwrap();
        let second = search_url(&base, "rust").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.path(), "/jobs/rust-jobs");
    }

    #[test]
    fn test_search_url_encodes_spaces() {
        let base = Url::parse("https://www.linkedin.com/jobs").unwrap();
        let url = search_url(&base, "software engineer").unwrap();
        assert_eq!(url.path(), "/jobs/software%20engineer-jobs");
    }

    #[test]
    fn test_search_url_rejects_opaque_base() {
        let base = Url::parse("mailto:jobs@example.com").unwrap();
        assert!(matches!(
            search_url(&base, "rust"),
            Err(ScrapeError::BaseUrl(_))
        ));
    }

    #[test]
    fn test_fetch_sends_page_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/jobs/rust-jobs")
                .query_param("pageNum", "2")
                .query_param("location", "Austin")
                .query_param("distance", "25");
            then.status(200).body("<html><body></body></html>");
        });

        let config =
            ScraperConfig::default().with_base_url(Url::parse(&server.url("/jobs")).unwrap());
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = search_url(&config.base_url, "rust").unwrap();

        let page = fetcher.fetch(&url, &query(2)).unwrap();

        mock.assert();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html><body></body></html>");
    }

    #[test]
    fn test_fetch_reports_error_status_without_failing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/jobs/rust-jobs");
            then.status(429).body("slow down");
        });

        let config =
            ScraperConfig::default().with_base_url(Url::parse(&server.url("/jobs")).unwrap());
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = search_url(&config.base_url, "rust").unwrap();

        let page = fetcher.fetch(&url, &query(0)).unwrap();

        mock.assert();
        assert_eq!(page.status, 429);
    }
}
