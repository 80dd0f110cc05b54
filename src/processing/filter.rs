//! Result filtering over ranked postings
//!
//! All configured criteria are combined with AND; the filter never re-sorts,
//! so relative order is preserved and filtering is idempotent.

use crate::jobs::posting::{JobType, ScoredPosting};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seniority bands detected via keyword matching against title and
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
    Executive,
}

impl ExperienceLevel {
    const ALL: [ExperienceLevel; 7] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
        ExperienceLevel::Principal,
        ExperienceLevel::Executive,
    ];

    fn pattern(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => r"(?i)\b(entry|junior|jr|graduate|intern)\b",
            ExperienceLevel::Junior => r"(?i)\b(junior|jr)\b",
            ExperienceLevel::Mid => r"(?i)\b(mid|middle|intermediate)\b",
            ExperienceLevel::Senior => r"(?i)\b(senior|sr)\b",
            ExperienceLevel::Lead => r"(?i)\b(lead|principal|staff)\b",
            ExperienceLevel::Principal => r"(?i)\b(principal|staff|architect)\b",
            ExperienceLevel::Executive => r"(?i)\b(executive|director|vp|cto|ceo|head)\b",
        }
    }
}

/// Optional constraints narrowing a ranked list; unset criteria mean "no
/// constraint on that dimension".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub min_salary: Option<f64>,
    pub experience_levels: Vec<ExperienceLevel>,
    pub job_types: Vec<JobType>,
    pub required_skills: Vec<String>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.min_salary.is_none()
            && self.experience_levels.is_empty()
            && self.job_types.is_empty()
            && self.required_skills.is_empty()
    }
}

pub struct JobFilter {
    level_patterns: HashMap<ExperienceLevel, Regex>,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl JobFilter {
    pub fn new() -> Self {
        let level_patterns = ExperienceLevel::ALL
            .iter()
            .map(|level| {
                (
                    *level,
                    Regex::new(level.pattern()).expect("Invalid experience level regex"),
                )
            })
            .collect();

        Self { level_patterns }
    }

    /// Keep the postings that satisfy every configured criterion,
    /// preserving relative order.
    pub fn apply(&self, ranked: Vec<ScoredPosting>, criteria: &FilterCriteria) -> Vec<ScoredPosting> {
        if criteria.is_unconstrained() {
            return ranked;
        }

        ranked
            .into_iter()
            .filter(|scored| self.matches(scored, criteria))
            .collect()
    }

    fn matches(&self, scored: &ScoredPosting, criteria: &FilterCriteria) -> bool {
        self.passes_salary(scored, criteria)
            && self.passes_experience(scored, criteria)
            && self.passes_job_type(scored, criteria)
            && self.passes_skills(scored, criteria)
    }

    /// Postings with no salary information cannot verify the constraint and
    /// are excluded when a minimum is set.
    fn passes_salary(&self, scored: &ScoredPosting, criteria: &FilterCriteria) -> bool {
        match criteria.min_salary {
            None => true,
            Some(min) => match scored.posting.salary_floor() {
                Some(floor) => floor >= min,
                None => false,
            },
        }
    }

    fn passes_experience(&self, scored: &ScoredPosting, criteria: &FilterCriteria) -> bool {
        if criteria.experience_levels.is_empty() {
            return true;
        }

        let haystack = format!("{} {}", scored.posting.title, scored.posting.description);
        criteria
            .experience_levels
            .iter()
            .any(|level| self.level_patterns[level].is_match(&haystack))
    }

    fn passes_job_type(&self, scored: &ScoredPosting, criteria: &FilterCriteria) -> bool {
        if criteria.job_types.is_empty() {
            return true;
        }

        criteria
            .job_types
            .iter()
            .any(|allowed| *allowed == scored.posting.job_type)
    }

    /// Every configured skill must appear in the description (AND, not OR).
    fn passes_skills(&self, scored: &ScoredPosting, criteria: &FilterCriteria) -> bool {
        if criteria.required_skills.is_empty() {
            return true;
        }

        let description = scored.posting.description.to_lowercase();
        criteria
            .required_skills
            .iter()
            .all(|skill| description.contains(&skill.trim().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::posting::{test_posting, JobPosting};

    fn scored(posting: JobPosting, score: f32, rank: usize) -> ScoredPosting {
        ScoredPosting {
            posting,
            score,
            rank,
        }
    }

    fn salary_posting(id: &str, salary_min: Option<f64>) -> ScoredPosting {
        let mut posting = test_posting(id, "Engineer", "desc");
        posting.salary_min = salary_min;
        scored(posting, 0.5, 1)
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let filter = JobFilter::new();
        let input = vec![
            scored(test_posting("a", "Engineer", "desc"), 0.9, 1),
            scored(test_posting("b", "Engineer", "desc"), 0.3, 2),
        ];

        let output = filter.apply(input.clone(), &FilterCriteria::default());

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].posting.id, "a");
        assert_eq!(output[1].posting.id, "b");
    }

    #[test]
    fn test_salary_filter_excludes_unknown_salaries() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            min_salary: Some(100_000.0),
            ..Default::default()
        };

        let input = vec![
            salary_posting("low", Some(90_000.0)),
            salary_posting("high", Some(150_000.0)),
            salary_posting("unknown", None),
        ];

        let output = filter.apply(input, &criteria);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].posting.id, "high");
    }

    #[test]
    fn test_experience_filter_matches_title_keywords() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            experience_levels: vec![ExperienceLevel::Senior],
            ..Default::default()
        };

        let input = vec![
            scored(test_posting("a", "Senior Rust Engineer", "desc"), 0.9, 1),
            scored(test_posting("b", "Junior Developer", "desc"), 0.8, 2),
            scored(
                test_posting("c", "Engineer", "looking for a Sr backend developer"),
                0.7,
                3,
            ),
        ];

        let output = filter.apply(input, &criteria);

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].posting.id, "a");
        assert_eq!(output[1].posting.id, "c");
    }

    #[test]
    fn test_job_type_filter() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            job_types: vec![JobType::Contract],
            ..Default::default()
        };

        let mut contract = test_posting("a", "Engineer", "desc");
        contract.job_type = JobType::Contract;
        let full_time = test_posting("b", "Engineer", "desc");

        let output = filter.apply(
            vec![scored(contract, 0.9, 1), scored(full_time, 0.8, 2)],
            &criteria,
        );

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].posting.id, "a");
    }

    #[test]
    fn test_skills_filter_requires_every_skill() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            required_skills: vec!["Python".to_string(), "AWS".to_string()],
            ..Default::default()
        };

        let input = vec![
            scored(
                test_posting("both", "Engineer", "We use Python and AWS daily"),
                0.9,
                1,
            ),
            scored(
                test_posting("python-only", "Engineer", "Python shop, on-prem"),
                0.8,
                2,
            ),
        ];

        let output = filter.apply(input, &criteria);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].posting.id, "both");
    }

    #[test]
    fn test_skills_match_is_case_insensitive() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            required_skills: vec!["python".to_string()],
            ..Default::default()
        };

        let input = vec![scored(
            test_posting("a", "Engineer", "Experience with PYTHON required"),
            0.9,
            1,
        )];

        assert_eq!(filter.apply(input, &criteria).len(), 1);
    }

    #[test]
    fn test_filtering_is_idempotent_and_order_preserving() {
        let filter = JobFilter::new();
        let criteria = FilterCriteria {
            min_salary: Some(50_000.0),
            ..Default::default()
        };

        let input = vec![
            salary_posting("a", Some(80_000.0)),
            salary_posting("b", Some(20_000.0)),
            salary_posting("c", Some(60_000.0)),
        ];

        let once = filter.apply(input, &criteria);
        let twice = filter.apply(once.clone(), &criteria);

        let ids: Vec<&str> = once.iter().map(|s| s.posting.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(once.len(), twice.len());
        for (x, y) in once.iter().zip(twice.iter()) {
            assert_eq!(x.posting.id, y.posting.id);
        }
    }
}
