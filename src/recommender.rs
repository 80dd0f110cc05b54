//! Recommendation pipeline orchestration
//!
//! Wires the stages in sequence: resume extraction, job fetch, text
//! normalization, embedding, ranking, filtering, and output. Each stage
//! completes fully before the next begins and persists a snapshot of its
//! result to the results directory. The first failing stage aborts the run;
//! no later stage executes.

use crate::config::Config;
use crate::embedding::EmbeddingClient;
use crate::error::{JobMatcherError, Result};
use crate::input::manager::InputManager;
use crate::jobs::adzuna::AdzunaClient;
use crate::jobs::posting::ScoredPosting;
use crate::output::artifacts::ArtifactWriter;
use crate::processing::filter::{FilterCriteria, JobFilter};
use crate::processing::ranker;
use crate::processing::text_processor::TextProcessor;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub struct RecommendationRequest {
    pub resume_path: PathBuf,
    pub location: String,
    pub keywords: String,
    pub max_jobs: usize,
    pub top_n: usize,
    pub criteria: Option<FilterCriteria>,
}

pub struct RecommendationService {
    input_manager: InputManager,
    text_processor: TextProcessor,
    job_client: AdzunaClient,
    embedding_client: EmbeddingClient,
    job_filter: JobFilter,
    artifacts: ArtifactWriter,
    remove_stop_words: bool,
}

/// Compact per-posting score record persisted for inspection.
#[derive(Debug, Serialize)]
struct ScoreRecord<'a> {
    rank: usize,
    id: &'a str,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    similarity_score: f32,
}

#[derive(Debug, Serialize)]
struct EmbeddingSnapshot<'a> {
    dimension: usize,
    embedding: &'a [f32],
}

#[derive(Debug, Serialize)]
struct BatchEmbeddingSnapshot<'a> {
    count: usize,
    dimension: usize,
    embeddings: &'a [Vec<f32>],
}

impl RecommendationService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            input_manager: InputManager::new(),
            text_processor: TextProcessor::new(),
            job_client: AdzunaClient::new(&config.job_source)?,
            embedding_client: EmbeddingClient::new(&config.embedding)?,
            job_filter: JobFilter::new(),
            artifacts: ArtifactWriter::new(config.output.results_dir.clone()),
            remove_stop_words: config.processing.remove_stop_words,
        })
    }

    /// Run the complete pipeline and return the final top-N recommendations.
    pub async fn run(&mut self, request: &RecommendationRequest) -> Result<Vec<ScoredPosting>> {
        // Step 1: resume text
        println!("Step 1: Processing resume...");
        let resume_text = self
            .input_manager
            .extract_text(&request.resume_path)
            .await?;
        println!(
            "   Resume processed ({} characters)",
            resume_text.len()
        );

        // Step 2: fetch postings
        println!("\nStep 2: Fetching job postings...");
        let spinner = stage_spinner("Querying Adzuna");
        let postings = self
            .job_client
            .fetch_jobs(&request.location, &request.keywords, request.max_jobs)
            .await;
        spinner.finish_and_clear();
        let postings = postings?;

        if postings.is_empty() {
            return Err(JobMatcherError::JobSource(format!(
                "No postings found for '{}' in '{}'",
                request.keywords, request.location
            )));
        }
        println!("   Fetched {} job postings", postings.len());
        self.artifacts.write_json("job_postings_raw.json", &postings)?;

        // Step 3: normalize text
        println!("\nStep 3: Normalizing text...");
        let clean_resume = self
            .text_processor
            .prepare_resume_text(&resume_text, self.remove_stop_words);
        if clean_resume.is_empty() {
            return Err(JobMatcherError::InvalidInput(
                "Resume text is empty after cleaning".to_string(),
            ));
        }

        let job_texts: Vec<String> = postings
            .iter()
            .map(|posting| {
                self.text_processor
                    .prepare_job_text(posting, self.remove_stop_words)
            })
            .collect();

        self.artifacts.write_text("resume_cleaned.txt", &clean_resume)?;
        self.artifacts.write_json("job_texts_cleaned.json", &job_texts)?;

        // Step 4: embeddings
        println!("\nStep 4: Generating embeddings...");
        let spinner = stage_spinner("Calling embedding API");
        let embed_result = self.embed_all(&clean_resume, &job_texts).await;
        spinner.finish_and_clear();
        let (resume_embedding, job_embeddings) = embed_result?;

        println!(
            "   Generated {} job embeddings (dimension {})",
            job_embeddings.len(),
            resume_embedding.len()
        );

        self.artifacts.write_json(
            "resume_embedding.json",
            &EmbeddingSnapshot {
                dimension: resume_embedding.len(),
                embedding: &resume_embedding,
            },
        )?;
        self.artifacts.write_json(
            "job_embeddings.json",
            &BatchEmbeddingSnapshot {
                count: job_embeddings.len(),
                dimension: job_embeddings.first().map(Vec::len).unwrap_or(0),
                embeddings: &job_embeddings,
            },
        )?;

        // Step 5: rank by similarity
        println!("\nStep 5: Calculating similarities...");
        let candidates: Vec<_> = postings.into_iter().zip(job_embeddings).collect();
        let ranked = ranker::rank(&resume_embedding, candidates)?;

        let score_records: Vec<ScoreRecord> = ranked
            .iter()
            .map(|scored| ScoreRecord {
                rank: scored.rank,
                id: &scored.posting.id,
                title: &scored.posting.title,
                company: &scored.posting.company,
                location: &scored.posting.location,
                similarity_score: scored.score,
            })
            .collect();
        self.artifacts.write_json("similarity_scores.json", &score_records)?;
        println!("   Ranked {} postings", ranked.len());

        // Step 6: apply filters
        let filtered = match &request.criteria {
            Some(criteria) => {
                println!("\nStep 6: Applying filters...");
                let kept = self.job_filter.apply(ranked, criteria);
                if kept.is_empty() {
                    return Err(JobMatcherError::InvalidInput(
                        "No postings match the configured filters".to_string(),
                    ));
                }
                println!("   {} postings match filters", kept.len());
                kept
            }
            None => ranked,
        };

        // Step 7: top-N and output artifacts
        let top = ranker::top_n(filtered, request.top_n);
        self.artifacts.write_json("top_recommendations.json", &top)?;
        self.artifacts.write_csv("top_recommendations.csv", &top)?;

        info!(
            "Pipeline complete: {} recommendations, artifacts in {}",
            top.len(),
            self.artifacts.dir().display()
        );

        Ok(top)
    }

    async fn embed_all(
        &self,
        clean_resume: &str,
        job_texts: &[String],
    ) -> Result<(Vec<f32>, Vec<Vec<f32>>)> {
        let resume_embedding = self.embedding_client.embed_text(clean_resume).await?;
        let job_embeddings = self.embedding_client.embed_batch(job_texts).await?;
        Ok((resume_embedding, job_embeddings))
    }
}

fn stage_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
