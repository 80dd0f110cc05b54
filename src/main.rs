//! Job matcher: resume-driven job recommendations via embedding similarity

mod cli;
mod config;
mod embedding;
mod error;
mod input;
mod jobs;
mod output;
mod processing;
mod recommender;

use clap::Parser;
use cli::Cli;
use config::Config;
use error::{JobMatcherError, Result};
use log::error;
use recommender::{RecommendationRequest, RecommendationService};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli, config).await {
        error!("Run failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    cli::validate_file_extension(&cli.resume, &["pdf", "docx", "doc", "txt", "md"])
        .map_err(|e| JobMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

    let request = RecommendationRequest {
        resume_path: cli.resume.clone(),
        location: cli
            .location
            .clone()
            .unwrap_or_else(|| config.search.default_location.clone()),
        keywords: cli
            .keywords
            .clone()
            .unwrap_or_else(|| config.search.default_keywords.clone()),
        max_jobs: cli.max_jobs.unwrap_or(config.search.max_jobs),
        top_n: cli.top_n.unwrap_or(config.search.top_n),
        criteria: cli.filter_criteria(),
    };

    output::display::print_banner();

    let mut service = RecommendationService::new(&config)?;
    let recommendations = service.run(&request).await?;

    output::display::print_recommendations(&recommendations);

    if let Some(output_path) = &cli.output {
        output::artifacts::write_csv_to(output_path, &recommendations)?;
        println!("Recommendations saved to: {}", output_path.display());
        println!();
    }

    output::display::print_footer();
    Ok(())
}
