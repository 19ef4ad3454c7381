//! LinkedIn Job Scraper CLI
//!
//! Runs one LinkedIn search and saves the response to data/jobs.json

use anyhow::Context;
use clap::Parser;
use common::{Scraper, ScraperInput};
use linkedin_scraper::{LinkedInScraper, ScraperConfig};
use reqwest::Url;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Scrape job postings from LinkedIn's public job search.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CliArgs {
    /// Keyword to search for, e.g. "rust developer".
    search_term: String,
    /// City or region to search around.
    #[clap(short, long, default_value = "")]
    location: String,
    /// Search radius in miles.
    #[clap(short, long, default_value_t = 25)]
    distance: u32,
    /// Maximum number of postings to collect.
    #[clap(short = 'n', long, default_value_t = 15)]
    results_wanted: usize,
    /// Where to write the JSON response.
    #[clap(short, long, default_value = "data/jobs.json")]
    output: PathBuf,
    /// Override the job search base URL.
    #[clap(long)]
    base_url: Option<Url>,
    /// Request timeout in seconds.
    #[clap(long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = CliArgs::parse();

    println!("🔍 Starting LinkedIn Job Scraper...\n");

    let mut config = ScraperConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let scraper = LinkedInScraper::new(config);

    let input = ScraperInput {
        search_term: args.search_term,
        location: args.location,
        distance: args.distance,
        results_wanted: args.results_wanted,
    };

    let response = scraper.scrape(&input);

    for job in &response.jobs {
        println!("📋 Found: {} at {}", job.title, job.company_name);
    }
    println!(
        "\n📊 Collected {} of {} reported jobs",
        response.jobs.len(),
        response.job_count
    );

    // Create output directory if it doesn't exist
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
            println!("📁 Created {:?}", parent);
        }
    }

    let json_output =
        serde_json::to_string_pretty(&response).context("failed to serialize job response")?;
    fs::write(&args.output, json_output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("💾 Saved response to {:?}", args.output);

    if let Some(error) = response.error {
        anyhow::bail!("scrape failed: {error}");
    }

    println!("\n✨ Scraping complete!");
    Ok(())
}
