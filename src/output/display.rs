//! Console presentation of ranked recommendations

use crate::jobs::posting::ScoredPosting;
use colored::Colorize;

const RULE_WIDTH: usize = 70;

pub fn print_banner() {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "JOB RECOMMENDATION SYSTEM".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();
}

pub fn print_recommendations(recommendations: &[ScoredPosting]) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{}",
        format!("TOP {} JOB RECOMMENDATIONS", recommendations.len()).bold()
    );
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();

    for scored in recommendations {
        println!(
            "{} - {}",
            format!("#{}", scored.rank).bold(),
            scored.posting.title.cyan()
        );
        println!("    Company: {}", scored.posting.company);
        println!("    Location: {}", scored.posting.location);
        println!(
            "    Similarity Score: {}",
            format_score(scored.score)
        );

        if let Some(salary) = scored.posting.salary_display() {
            println!("    Salary: {}", salary.green());
        }

        println!("    Job Type: {}", scored.posting.job_type);

        if let Some(url) = &scored.posting.url {
            println!("    URL: {}", url.dimmed());
        }

        println!();
    }
}

pub fn print_footer() {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Job recommendation process complete!");
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn format_score(score: f32) -> String {
    let formatted = format!("{:.3}", score);
    if score >= 0.5 {
        formatted.green().to_string()
    } else if score >= 0.2 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}
