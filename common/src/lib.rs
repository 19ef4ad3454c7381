//! Shared record shapes for the job aggregator.
//!
//! Every site-specific scraper takes a [`ScraperInput`] and answers with a
//! [`JobResponse`], so the API server can dispatch to any of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Job boards a scraper can serve.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    #[default]
    LinkedIn,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::LinkedIn => f.write_str("linkedin"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("site {0} is not supported")]
pub struct UnknownSite(pub String);

impl FromStr for Site {
    type Err = UnknownSite;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Site::LinkedIn),
            _ => Err(UnknownSite(name.to_string())),
        }
    }
}

fn default_distance() -> u32 {
    25
}

fn default_results_wanted() -> usize {
    15
}

/// Search criteria for one scrape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScraperInput {
    pub search_term: String,
    #[serde(default)]
    pub location: String,
    /// Search radius in miles.
    #[serde(default = "default_distance")]
    pub distance: u32,
    #[serde(default = "default_results_wanted")]
    pub results_wanted: usize,
}

impl ScraperInput {
    pub fn new(search_term: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            location: location.into(),
            distance: default_distance(),
            results_wanted: default_results_wanted(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    pub country: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    /// Location known only down to the country.
    pub fn country_only(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city: None,
            state: None,
        }
    }
}

/// How an applicant reaches the posting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Url,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub method: DeliveryMethod,
    pub value: String,
}

impl Delivery {
    pub fn url(value: impl Into<String>) -> Self {
        Self {
            method: DeliveryMethod::Url,
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobPost {
    pub title: String,
    pub company_name: String,
    pub location: Location,
    pub date_posted: Option<NaiveDate>,
    pub delivery: Delivery,
}

/// Result of one scrape.
///
/// `job_count` is the total the site reports for the search, which is usually
/// far larger than `jobs.len()`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobResponse {
    pub success: bool,
    pub error: Option<String>,
    pub jobs: Vec<JobPost>,
    pub job_count: usize,
}

impl JobResponse {
    pub fn success(jobs: Vec<JobPost>, job_count: usize) -> Self {
        Self {
            success: true,
            error: None,
            jobs,
            job_count,
        }
    }

    /// A failed run. `jobs` holds whatever was collected before the failure.
    pub fn failure(error: impl Into<String>, jobs: Vec<JobPost>, job_count: usize) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            jobs,
            job_count,
        }
    }
}

/// A site-specific scraper.
pub trait Scraper: Send + Sync {
    fn site(&self) -> Site;

    /// Runs one search. Failures are reported inside the response.
    fn scrape(&self, input: &ScraperInput) -> JobResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_input_defaults() {
        let input: ScraperInput =
            serde_json::from_str(r#"{"search_term": "rust developer"}"#).unwrap();
        assert_eq!(input.location, "");
        assert_eq!(input.distance, 25);
        assert_eq!(input.results_wanted, 15);
    }

    #[test]
    fn test_delivery_method_serializes_lowercase() {
        let json = serde_json::to_value(Delivery::url("https://example.com/job/1")).unwrap();
        assert_eq!(json["method"], "url");
        assert_eq!(json["value"], "https://example.com/job/1");
    }

    #[test]
    fn test_date_posted_serializes_as_iso_date() {
        let post = JobPost {
            title: "Backend Engineer".to_string(),
            company_name: "Acme".to_string(),
            location: Location::country_only("US"),
            date_posted: NaiveDate::from_ymd_opt(2023, 7, 14),
            delivery: Delivery::url("https://example.com/job/1"),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date_posted"], "2023-07-14");
        assert!(json["location"]["city"].is_null());
    }

    #[test]
    fn test_failure_keeps_partial_jobs() {
        let response = JobResponse::failure("Response returned 429", Vec::new(), 120);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Response returned 429"));
        assert_eq!(response.job_count, 120);
    }

    #[test]
    fn test_site_from_name() {
        assert_eq!("linkedin".parse::<Site>(), Ok(Site::LinkedIn));
        assert_eq!(" LinkedIn ".parse::<Site>(), Ok(Site::LinkedIn));
        let err = "indeed".parse::<Site>().unwrap_err();
        assert_eq!(err.to_string(), "site indeed is not supported");
    }

    #[test]
    fn test_site_display_matches_serde_name() {
        let json = serde_json::to_value(Site::LinkedIn).unwrap();
        assert_eq!(json, Site::LinkedIn.to_string());
    }
}
