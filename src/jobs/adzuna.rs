//! Adzuna job search API client
//!
//! Adzuna aggregates postings from multiple boards behind a single paged
//! REST endpoint. Credentials come from the configuration or from the
//! ADZUNA_APP_ID / ADZUNA_API_KEY environment variables.

use crate::config::JobSourceConfig;
use crate::error::{JobMatcherError, Result};
use crate::jobs::posting::{JobPosting, JobType};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Duration;

const SOURCE_NAME: &str = "Adzuna";

pub struct AdzunaClient {
    http: reqwest::Client,
    app_id: String,
    app_key: String,
    base_url: String,
    results_per_page: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: Option<String>,
    title: Option<String>,
    company: Option<AdzunaCompany>,
    location: Option<AdzunaLocation>,
    description: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    contract_type: Option<String>,
    contract_time: Option<String>,
    redirect_url: Option<String>,
    created: Option<String>,
    category: Option<AdzunaCategory>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCompany {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaLocation {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCategory {
    label: Option<String>,
}

impl AdzunaClient {
    pub fn new(config: &JobSourceConfig) -> Result<Self> {
        let app_id = resolve_credential(config.app_id.as_deref(), "ADZUNA_APP_ID")?;
        let app_key = resolve_credential(config.app_key.as_deref(), "ADZUNA_API_KEY")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            app_id,
            app_key,
            base_url: format!(
                "https://api.adzuna.com/v1/api/jobs/{}/search",
                config.country
            ),
            results_per_page: config.results_per_page.max(1),
        })
    }

    /// Fetch up to `max_jobs` postings, paging until the API runs dry.
    ///
    /// Any request or decode failure aborts the whole fetch; partial results
    /// are never returned.
    pub async fn fetch_jobs(
        &self,
        location: &str,
        keywords: &str,
        max_jobs: usize,
    ) -> Result<Vec<JobPosting>> {
        let mut all_jobs: Vec<JobPosting> = Vec::new();
        let mut page = 1usize;

        while all_jobs.len() < max_jobs {
            let remaining = max_jobs - all_jobs.len();
            let page_size = self.results_per_page.min(remaining);

            info!("Fetching jobs from Adzuna API (page {})...", page);
            let results = self
                .fetch_page(page, page_size, location, keywords)
                .await?;

            if results.is_empty() {
                break;
            }

            let fetched = results.len();
            for job in results {
                match convert_adzuna_job(job) {
                    Some(posting) => all_jobs.push(posting),
                    None => warn!("Skipping posting without id or description"),
                }
            }

            // A short page means the API has no further results
            if fetched < self.results_per_page {
                break;
            }

            page += 1;
        }

        all_jobs.truncate(max_jobs);
        debug!("Fetched {} postings from Adzuna", all_jobs.len());
        Ok(all_jobs)
    }

    async fn fetch_page(
        &self,
        page: usize,
        page_size: usize,
        location: &str,
        keywords: &str,
    ) -> Result<Vec<AdzunaJob>> {
        let url = format!("{}/{}", self.base_url, page);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("results_per_page", &page_size.to_string()),
                ("what", keywords),
                ("where", location),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobMatcherError::JobSource(format!(
                "Adzuna returned status {} for page {}",
                status, page
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}

fn resolve_credential(configured: Option<&str>, env_var: &str) -> Result<String> {
    let value = match configured {
        Some(v) => v.trim().to_string(),
        None => std::env::var(env_var).unwrap_or_default().trim().to_string(),
    };

    if value.is_empty() {
        return Err(JobMatcherError::Configuration(format!(
            "{} is not set (configure it or export the environment variable)",
            env_var
        )));
    }

    Ok(value)
}

/// Convert an Adzuna payload into our posting model.
///
/// Postings need at minimum an identifier and description text to be
/// embeddable; anything else falls back to a placeholder.
fn convert_adzuna_job(job: AdzunaJob) -> Option<JobPosting> {
    let id = job.id?;
    let description = job.description.filter(|d| !d.trim().is_empty())?;

    let posted_date = job
        .created
        .as_deref()
        .and_then(parse_posted_date);

    Some(JobPosting {
        id,
        title: job.title.unwrap_or_else(|| "N/A".to_string()),
        company: job
            .company
            .and_then(|c| c.display_name)
            .unwrap_or_else(|| "N/A".to_string()),
        location: job
            .location
            .and_then(|l| l.display_name)
            .unwrap_or_else(|| "N/A".to_string()),
        description,
        salary_min: job.salary_min,
        salary_max: job.salary_max,
        job_type: JobType::from_contract_fields(
            job.contract_type.as_deref(),
            job.contract_time.as_deref(),
        ),
        tags: job
            .category
            .and_then(|c| c.label)
            .into_iter()
            .collect(),
        url: job.redirect_url,
        posted_date,
        source: SOURCE_NAME.to_string(),
    })
}

fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // Adzuna sometimes omits the offset
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|ndt| ndt.and_utc())
                .ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> AdzunaJob {
        AdzunaJob {
            id: Some("12345".to_string()),
            title: Some("Senior Rust Engineer".to_string()),
            company: Some(AdzunaCompany {
                display_name: Some("Acme Corp".to_string()),
            }),
            location: Some(AdzunaLocation {
                display_name: Some("St. Louis, MO".to_string()),
            }),
            description: Some("Build backend services in Rust".to_string()),
            salary_min: Some(120_000.0),
            salary_max: Some(160_000.0),
            contract_type: Some("permanent".to_string()),
            contract_time: Some("full_time".to_string()),
            redirect_url: Some("https://example.com/job/12345".to_string()),
            created: Some("2026-07-14T08:30:00Z".to_string()),
            category: Some(AdzunaCategory {
                label: Some("IT Jobs".to_string()),
            }),
        }
    }

    #[test]
    fn test_convert_maps_all_fields() {
        let posting = convert_adzuna_job(sample_job()).unwrap();

        assert_eq!(posting.id, "12345");
        assert_eq!(posting.title, "Senior Rust Engineer");
        assert_eq!(posting.company, "Acme Corp");
        assert_eq!(posting.salary_min, Some(120_000.0));
        assert_eq!(posting.job_type, JobType::Permanent);
        assert_eq!(posting.tags, vec!["IT Jobs".to_string()]);
        assert_eq!(posting.source, "Adzuna");
        assert!(posting.posted_date.is_some());
    }

    #[test]
    fn test_convert_requires_id_and_description() {
        let mut job = sample_job();
        job.id = None;
        assert!(convert_adzuna_job(job).is_none());

        let mut job = sample_job();
        job.description = Some("   ".to_string());
        assert!(convert_adzuna_job(job).is_none());
    }

    #[test]
    fn test_posted_date_accepts_both_formats() {
        assert!(parse_posted_date("2026-07-14T08:30:00Z").is_some());
        assert!(parse_posted_date("2026-07-14T08:30:00").is_some());
        assert!(parse_posted_date("last Tuesday").is_none());
    }

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let raw = r#"{"results": [{"id": "1", "description": "Rust role"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let posting = convert_adzuna_job(parsed.results.into_iter().next().unwrap()).unwrap();

        assert_eq!(posting.title, "N/A");
        assert_eq!(posting.job_type, JobType::FullTime);
        assert!(posting.salary_floor().is_none());
    }
}
