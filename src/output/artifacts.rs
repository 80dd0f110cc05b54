//! Per-stage artifact snapshots
//!
//! Each pipeline stage persists its output as a flat file in the results
//! directory: JSON for structured records, plain text for cleaned input, CSV
//! for the final tabular listing. Artifacts are write-once per run and exist
//! for inspection, not as a source of truth.

use crate::error::Result;
use crate::jobs::posting::ScoredPosting;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct ArtifactWriter {
    dir: PathBuf,
}

/// Flattened recommendation row for the tabular output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    rank: usize,
    score: f32,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    salary: String,
    job_type: &'a str,
    url: &'a str,
}

impl<'a> CsvRow<'a> {
    fn from_scored(scored: &'a ScoredPosting) -> Self {
        Self {
            rank: scored.rank,
            score: scored.score,
            title: &scored.posting.title,
            company: &scored.posting.company,
            location: &scored.posting.location,
            salary: scored.posting.salary_display().unwrap_or_default(),
            job_type: scored.posting.job_type.label(),
            url: scored.posting.url.as_deref().unwrap_or(""),
        }
    }
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.prepare_path(name)?;
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content)?;
        debug!("Wrote artifact: {}", path.display());
        Ok(path)
    }

    pub fn write_text(&self, name: &str, text: &str) -> Result<PathBuf> {
        let path = self.prepare_path(name)?;
        std::fs::write(&path, text)?;
        debug!("Wrote artifact: {}", path.display());
        Ok(path)
    }

    pub fn write_csv(&self, name: &str, recommendations: &[ScoredPosting]) -> Result<PathBuf> {
        let path = self.prepare_path(name)?;
        write_csv_to(&path, recommendations)?;
        debug!("Wrote artifact: {}", path.display());
        Ok(path)
    }

    fn prepare_path(&self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(self.dir.join(name))
    }
}

/// Write the recommendation table to an arbitrary path (used by --output).
pub fn write_csv_to(path: &Path, recommendations: &[ScoredPosting]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for scored in recommendations {
        writer.serialize(CsvRow::from_scored(scored))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::posting::test_posting;

    fn sample_recommendations() -> Vec<ScoredPosting> {
        let mut first = test_posting("1", "Senior Engineer", "Rust backend work");
        first.salary_min = Some(140_000.0);
        first.url = Some("https://example.com/1".to_string());

        vec![
            ScoredPosting {
                posting: first,
                score: 0.91,
                rank: 1,
            },
            ScoredPosting {
                posting: test_posting("2", "Platform Engineer", "Kubernetes"),
                score: 0.84,
                rank: 2,
            },
        ]
    }

    #[test]
    fn test_write_json_and_text_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("results"));

        let json_path = writer
            .write_json("top_recommendations.json", &sample_recommendations())
            .unwrap();
        let text_path = writer.write_text("resume_cleaned.txt", "cleaned text").unwrap();

        let json_content = std::fs::read_to_string(json_path).unwrap();
        assert!(json_content.contains("Senior Engineer"));
        assert_eq!(std::fs::read_to_string(text_path).unwrap(), "cleaned text");
    }

    #[test]
    fn test_write_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        let path = writer
            .write_csv("top_recommendations.csv", &sample_recommendations())
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,score,title"));
        assert!(lines[1].contains("Senior Engineer"));
        assert!(lines[1].contains("$140,000+"));
        assert!(lines[2].contains("Platform Engineer"));
    }
}
