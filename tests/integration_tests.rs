//! Integration tests for the job matcher

use job_matcher::input::manager::InputManager;
use job_matcher::jobs::posting::{JobPosting, JobType, ScoredPosting};
use job_matcher::processing::filter::{ExperienceLevel, FilterCriteria, JobFilter};
use job_matcher::processing::ranker;
use job_matcher::processing::text_processor::TextProcessor;
use std::path::Path;

fn posting(id: &str, title: &str, description: &str, salary_min: Option<f64>) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        company: "Acme Corp".to_string(),
        location: "St. Louis, MO".to_string(),
        description: description.to_string(),
        salary_min,
        salary_max: None,
        job_type: JobType::FullTime,
        tags: vec!["IT Jobs".to_string()],
        url: Some(format!("https://example.com/{}", id)),
        posted_date: None,
        source: "Adzuna".to_string(),
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    // First extraction
    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[test]
fn test_rank_filter_top_n_pipeline() {
    // Three postings with hand-built embeddings against a fixed reference
    let reference = vec![1.0, 0.0];
    let candidates = vec![
        (
            posting("close", "Senior Rust Engineer", "Rust and AWS work", Some(150_000.0)),
            vec![0.9, 0.1],
        ),
        (
            posting("mid", "Senior Platform Engineer", "Rust services on AWS", Some(120_000.0)),
            vec![0.5, 0.5],
        ),
        (
            posting("far", "Junior QA Analyst", "Manual testing", Some(60_000.0)),
            vec![0.0, 1.0],
        ),
    ];

    let ranked = ranker::rank(&reference, candidates).unwrap();
    assert_eq!(ranked[0].posting.id, "close");
    assert_eq!(ranked[1].posting.id, "mid");
    assert_eq!(ranked[2].posting.id, "far");

    let criteria = FilterCriteria {
        min_salary: Some(100_000.0),
        experience_levels: vec![ExperienceLevel::Senior],
        job_types: vec![JobType::FullTime],
        required_skills: vec!["Rust".to_string(), "AWS".to_string()],
    };

    let filter = JobFilter::new();
    let filtered = filter.apply(ranked, &criteria);
    let ids: Vec<&str> = filtered.iter().map(|s| s.posting.id.as_str()).collect();
    assert_eq!(ids, vec!["close", "mid"]);

    let top = ranker::top_n(filtered, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].posting.id, "close");
    assert_eq!(top[0].rank, 1);
}

#[test]
fn test_cleaned_job_text_feeds_ranking_end_to_end() {
    let processor = TextProcessor::new();
    let job = posting(
        "1",
        "Backend Engineer",
        "<p>Build services in <b>Rust</b> &amp; Python</p> apply at jobs@example.com",
        None,
    );

    let text = processor.prepare_job_text(&job, false);
    assert!(text.contains("rust"));
    assert!(text.contains("python"));
    assert!(!text.contains("jobs@example.com"));
    assert!(!text.contains("<b>"));
}

#[test]
fn test_filtered_output_preserves_scored_fields() {
    let filter = JobFilter::new();
    let scored = vec![ScoredPosting {
        posting: posting("1", "Engineer", "Rust work", Some(100_000.0)),
        score: 0.73,
        rank: 1,
    }];

    let out = filter.apply(scored, &FilterCriteria::default());
    assert_eq!(out[0].score, 0.73);
    assert_eq!(out[0].rank, 1);
}
