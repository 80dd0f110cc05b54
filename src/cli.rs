//! CLI interface for the job matcher

use crate::jobs::posting::JobType;
use crate::processing::filter::{ExperienceLevel, FilterCriteria};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Resume-driven job recommendations via embedding similarity")]
#[command(
    long_about = "Fetch job postings from Adzuna, embed them alongside your resume, and rank them by cosine similarity with optional salary, experience, job-type, and skill filters"
)]
pub struct Cli {
    /// Path to resume file (PDF, DOCX, TXT, MD)
    pub resume: PathBuf,

    /// Job search location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Job search keywords
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Maximum number of postings to fetch
    #[arg(long)]
    pub max_jobs: Option<usize>,

    /// Minimum salary filter
    #[arg(long)]
    pub min_salary: Option<f64>,

    /// Experience levels to keep
    #[arg(long = "experience", value_enum, num_args = 1..)]
    pub experience_levels: Vec<ExperienceLevel>,

    /// Job types to keep
    #[arg(long = "job-type", value_enum, num_args = 1..)]
    pub job_types: Vec<JobType>,

    /// Required skills (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,

    /// Number of recommendations to show
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Save recommendations to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build filter criteria from the filter flags, or None when no filter was requested.
    pub fn filter_criteria(&self) -> Option<FilterCriteria> {
        let skills: Vec<String> = self
            .skills
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if self.min_salary.is_none()
            && self.experience_levels.is_empty()
            && self.job_types.is_empty()
            && skills.is_empty()
        {
            return None;
        }

        Some(FilterCriteria {
            min_salary: self.min_salary,
            experience_levels: self.experience_levels.clone(),
            job_types: self.job_types.clone(),
            required_skills: skills,
        })
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
