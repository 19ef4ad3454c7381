//! Page-by-page accumulation of search results.

use crate::error::ScrapeError;
use crate::extract::{Card, ListingExtractor};
use crate::fetch::{search_url, PageFetcher};
use common::{JobPost, JobResponse, ScraperInput};
use reqwest::Url;
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, warn};

enum State {
    Fetching { page: u32 },
    Extracting { page: u32, body: String },
    Done,
    Failed(ScrapeError),
}

#[derive(Default)]
struct Progress {
    jobs: Vec<JobPost>,
    seen_urls: HashSet<String>,
    /// Cards looked at across all pages, duplicates included.
    processed: usize,
    /// Total the first page reported, if it had a count header.
    job_count: Option<usize>,
}

/// Scrapes pages until `results_wanted` postings are collected or the site
/// runs out.
///
/// A fetch error or non-200 status stops the run. Postings gathered before
/// that are kept in the failed response.
pub fn run<F: PageFetcher + ?Sized>(
    fetcher: &F,
    base_url: &Url,
    input: &ScraperInput,
) -> JobResponse {
    let wanted = input.results_wanted;
    if wanted == 0 {
        debug!("no results wanted, skipping fetch");
        return JobResponse::success(Vec::new(), 0);
    }

    let url = match search_url(base_url, &input.search_term) {
        Ok(url) => url,
        Err(e) => return JobResponse::failure(e.to_string(), Vec::new(), 0),
    };

    let extractor = ListingExtractor::new();
    let mut progress = Progress::default();
    let mut state = State::Fetching { page: 0 };

    loop {
        state = match state {
            State::Fetching { page } => fetch_page(fetcher, &url, input, page),
            State::Extracting { page, body } => {
                progress.extract_page(&extractor, page, &body, wanted)
            }
            State::Done => break,
            State::Failed(e) => {
                warn!(
                    search_term = %input.search_term,
                    collected = progress.jobs.len(),
                    error = %e,
                    "scrape failed"
                );
                return JobResponse::failure(
                    e.to_string(),
                    progress.jobs,
                    progress.job_count.unwrap_or(0),
                );
            }
        };
    }

    let Progress { mut jobs, job_count, .. } = progress;
    jobs.truncate(wanted);
    info!(
        search_term = %input.search_term,
        collected = jobs.len(),
        job_count = job_count.unwrap_or(0),
        "scrape finished"
    );
    JobResponse::success(jobs, job_count.unwrap_or(0))
}

fn fetch_page<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &Url,
    input: &ScraperInput,
    page: u32,
) -> State {
    let query = [
        ("pageNum", page.to_string()),
        ("location", input.location.clone()),
        ("distance", input.distance.to_string()),
    ];

    debug!(%url, page, "fetching search page");
    match fetcher.fetch(url, &query) {
        Ok(fetched) if fetched.status == 200 => State::Extracting {
            page,
            body: fetched.body,
        },
        Ok(fetched) => State::Failed(ScrapeError::Status(fetched.status)),
        Err(e) => State::Failed(e),
    }
}

impl Progress {
    fn extract_page(
        &mut self,
        extractor: &ListingExtractor,
        page: u32,
        body: &str,
        wanted: usize,
    ) -> State {
        let document = Html::parse_document(body);

        if page == 0 {
            self.job_count = extractor.job_count(&document);
            if self.job_count.is_none() {
                warn!("job count header missing, reporting 0");
            }
        }

        let mut cards = 0;
        let mut added = 0;
        for card in extractor.cards(&document) {
            cards += 1;
            match card {
                Card::Posting(post) => {
                    if !self.seen_urls.insert(post.delivery.value.clone()) {
                        debug!(url = %post.delivery.value, "skipping duplicate listing");
                        continue;
                    }
                    self.jobs.push(post);
                    added += 1;
                    if self.jobs.len() >= wanted {
                        break;
                    }
                }
                Card::Unlinked => debug!(page, "skipping card without a listing link"),
                Card::Incomplete { url } => debug!(%url, "skipping card without an info block"),
            }
        }
        self.processed += cards;

        info!(page, cards, added, collected = self.jobs.len(), "processed search page");

        // Without a reported total, a page of nothing but repeats is the only
        // sign the site has stopped paging.
        let finished = match self.job_count {
            Some(total) => self.processed >= total,
            None => added == 0,
        };
        if self.jobs.len() >= wanted || cards == 0 || finished {
            State::Done
        } else {
            State::Fetching { page: page + 1 }
        }
    }
}
