//! Turns a LinkedIn search-results page into job posts.

use crate::location::parse_location;
use chrono::NaiveDate;
use common::{Delivery, JobPost};
use scraper::{ElementRef, Html, Selector};

const NOT_AVAILABLE: &str = "N/A";

/// Class attribute LinkedIn puts on every search-result card.
#[cfg(test)]
pub(crate) const CARD_CLASS: &str = "base-card relative w-full hover:no-underline focus:no-underline base-card--link base-search-card base-search-card--link job-search-card";

/// What one listing card turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Posting(JobPost),
    /// No full-link anchor, so there is nothing to deduplicate or apply to.
    Unlinked,
    /// Has a link but no info container.
    Incomplete { url: String },
}

/// CSS selectors for the search page, parsed once per scrape.
pub struct ListingExtractor {
    job_count: Selector,
    card: Selector,
    link: Selector,
    info: Selector,
    title: Selector,
    company: Selector,
    metadata: Selector,
    location: Selector,
    list_date: Selector,
}

impl Default for ListingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingExtractor {
    pub fn new() -> Self {
        Self {
            job_count: Selector::parse("span.results-context-header__job-count").unwrap(),
            card: Selector::parse("div.base-card.base-search-card.job-search-card").unwrap(),
            link: Selector::parse("a.base-card__full-link").unwrap(),
            info: Selector::parse("div.base-search-card__info").unwrap(),
            title: Selector::parse("h3.base-search-card__title").unwrap(),
            company: Selector::parse("a.hidden-nested-link").unwrap(),
            metadata: Selector::parse("div.base-search-card__metadata").unwrap(),
            location: Selector::parse("span.job-search-card__location").unwrap(),
            list_date: Selector::parse(
                "time.job-search-card__listdate, time.job-search-card__listdate--new",
            )
            .unwrap(),
        }
    }

    /// Total number of results the page header claims, e.g. `"1,234 jobs"`.
    pub fn job_count(&self, document: &Html) -> Option<usize> {
        document
            .select(&self.job_count)
            .next()
            .and_then(|el| parse_job_count(&el.text().collect::<String>()))
    }

    /// Listing cards in document order. Lazy, so the caller can stop as soon
    /// as it has enough.
    pub fn cards<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = Card> + 'a {
        document
            .select(&self.card)
            .map(move |card| self.extract_card(card))
    }

    fn extract_card(&self, card: ElementRef<'_>) -> Card {
        let Some(url) = card
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
        else {
            return Card::Unlinked;
        };
        let url = url.trim().to_string();

        let Some(info) = card.select(&self.info).next() else {
            return Card::Incomplete { url };
        };

        let title = first_text(info, &self.title).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let company_name =
            first_text(info, &self.company).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let metadata = info.select(&self.metadata).next();
        let location = parse_location(metadata, &self.location);
        let date_posted = metadata.and_then(|metadata| self.date_posted(metadata));

        Card::Posting(JobPost {
            title,
            company_name,
            location,
            date_posted,
            delivery: Delivery::url(url),
        })
    }

    fn date_posted(&self, metadata: ElementRef<'_>) -> Option<NaiveDate> {
        let raw = metadata
            .select(&self.list_date)
            .next()?
            .value()
            .attr("datetime")?;

        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!(raw, error = %e, "ignoring unparseable posting date");
                None
            }
        }
    }
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Keeps only the digits, so `"1,234 jobs"` reads as 1234.
pub fn parse_job_count(text: &str) -> Option<usize> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<usize>().ok()
}
