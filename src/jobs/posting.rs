//! Job posting data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single job listing as returned by the job source.
///
/// Immutable once fetched; downstream stages only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub job_type: JobType,
    /// Category labels reported by the aggregator.
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub source: String,
}

impl JobPosting {
    /// Lower salary bound used for filtering; falls back to the point value
    /// when only one bound is present.
    pub fn salary_floor(&self) -> Option<f64> {
        self.salary_min.or(self.salary_max)
    }

    /// Human-readable salary range, e.g. "$100,000 - $150,000" or "$100,000+".
    pub fn salary_display(&self) -> Option<String> {
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) if (min - max).abs() < f64::EPSILON => {
                Some(format!("${}", group_thousands(min)))
            }
            (Some(min), Some(max)) => Some(format!(
                "${} - ${}",
                group_thousands(min),
                group_thousands(max)
            )),
            (Some(min), None) => Some(format!("${}+", group_thousands(min))),
            (None, Some(max)) => Some(format!("up to ${}", group_thousands(max))),
            (None, None) => None,
        }
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Contract classification, normalized from the aggregator's contract fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Permanent,
    Internship,
}

impl JobType {
    /// Map Adzuna contract_type / contract_time values; contract_type wins.
    pub fn from_contract_fields(contract_type: Option<&str>, contract_time: Option<&str>) -> Self {
        contract_type
            .and_then(Self::from_adzuna_value)
            .or_else(|| contract_time.and_then(Self::from_adzuna_value))
            .unwrap_or(JobType::FullTime)
    }

    fn from_adzuna_value(value: &str) -> Option<Self> {
        match value {
            "full_time" => Some(JobType::FullTime),
            "part_time" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "temporary" => Some(JobType::Temporary),
            "permanent" => Some(JobType::Permanent),
            "internship" => Some(JobType::Internship),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::Permanent => "Permanent",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A posting paired with its similarity score and 1-based rank.
///
/// Derived data, recomputed each run; persisted only as output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPosting {
    pub posting: JobPosting,
    pub score: f32,
    pub rank: usize,
}

#[cfg(test)]
pub(crate) fn test_posting(id: &str, title: &str, description: &str) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        company: "Acme Corp".to_string(),
        location: "St. Louis, MO".to_string(),
        description: description.to_string(),
        salary_min: None,
        salary_max: None,
        job_type: JobType::FullTime,
        tags: Vec::new(),
        url: None,
        posted_date: None,
        source: "test".to_string(),
    }
}
