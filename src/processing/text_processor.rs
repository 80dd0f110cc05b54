//! Text cleaning and normalization for embedding generation

use crate::jobs::posting::JobPosting;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    html_tag_regex: Regex,
    url_regex: Regex,
    email_regex: Regex,
    phone_regexes: Vec<Regex>,
    special_chars_regex: Regex,
    punctuation_regex: Regex,
    whitespace_regex: Regex,
    section_patterns: Vec<(ResumeSection, Regex)>,
}

/// Resume sections recognized by header keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSection {
    Experience,
    Education,
    Skills,
    Summary,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let stop_words = Self::create_stop_words();

        let html_tag_regex = Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex");

        let url_regex = Regex::new(r"https?://[^\s]+").expect("Invalid URL regex");

        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("Invalid email regex");

        let phone_regexes = vec![
            Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("Invalid phone regex"),
            Regex::new(r"\(\d{3}\)\s*\d{3}[-.]?\d{4}").expect("Invalid phone regex"),
        ];

        // Keep letters, digits, whitespace, and basic punctuation
        let special_chars_regex =
            Regex::new(r"[^\w\s.,!?;:()\-]").expect("Invalid special chars regex");

        let punctuation_regex = Regex::new(r"[.,!?;:]+").expect("Invalid punctuation regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let section_patterns = vec![
            (
                ResumeSection::Experience,
                Regex::new(r"(?i)(?:work\s+)?experience|employment|professional\s+experience")
                    .expect("Invalid section regex"),
            ),
            (
                ResumeSection::Education,
                Regex::new(r"(?i)education|academic|qualifications|degrees?")
                    .expect("Invalid section regex"),
            ),
            (
                ResumeSection::Skills,
                Regex::new(r"(?i)skills|technical\s+skills|competencies|technologies")
                    .expect("Invalid section regex"),
            ),
            (
                ResumeSection::Summary,
                Regex::new(r"(?i)summary|objective|profile|about")
                    .expect("Invalid section regex"),
            ),
        ];

        Self {
            stop_words,
            html_tag_regex,
            url_regex,
            email_regex,
            phone_regexes,
            special_chars_regex,
            punctuation_regex,
            whitespace_regex,
            section_patterns,
        }
    }

    /// Clean and normalize text for embedding generation: decode HTML
    /// entities, strip markup, drop URLs/emails/phones, lowercase, collapse
    /// whitespace, and optionally remove stop words.
    pub fn clean_text(&self, text: &str, remove_stop_words: bool) -> String {
        let mut cleaned = decode_entities(text);

        cleaned = self.html_tag_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.url_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.email_regex.replace_all(&cleaned, " ").to_string();
        for phone_regex in &self.phone_regexes {
            cleaned = phone_regex.replace_all(&cleaned, " ").to_string();
        }

        cleaned = self.special_chars_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.punctuation_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self
            .whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_lowercase();

        if remove_stop_words {
            cleaned = self
                .tokenize(&cleaned)
                .into_iter()
                .filter(|word| word.len() > 2)
                .collect::<Vec<_>>()
                .join(" ");
        }

        cleaned
    }

    /// Tokenize into lowercase words using Unicode segmentation, dropping
    /// stop words and non-alphabetic tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| !self.stop_words.contains(word))
            .filter(|word| word.chars().any(|c| c.is_alphabetic()))
            .collect()
    }

    /// Combine posting fields into one embedding input. The title carries
    /// the strongest signal and is repeated to weight it.
    pub fn prepare_job_text(&self, posting: &JobPosting, remove_stop_words: bool) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(posting.title.clone());
        parts.push(posting.title.clone());
        parts.push(posting.company.clone());
        parts.push(posting.location.clone());
        parts.push(posting.description.clone());

        if let Some(salary) = posting.salary_display() {
            parts.push(format!("salary {}", salary));
        }
        parts.push(posting.job_type.label().to_string());

        self.clean_text(&parts.join(" "), remove_stop_words)
    }

    /// Build the resume embedding input, weighting the experience and skills
    /// sections by repeating them ahead of the full text.
    pub fn prepare_resume_text(&self, resume_text: &str, remove_stop_words: bool) -> String {
        let mut parts: Vec<String> = Vec::new();

        for section in [ResumeSection::Experience, ResumeSection::Skills] {
            if let Some(content) = self.extract_section(resume_text, section) {
                parts.push(content.clone());
                parts.push(content);
            }
        }
        parts.push(resume_text.to_string());

        self.clean_text(&parts.join(" "), remove_stop_words)
    }

    /// Extract one section's text, from its header keyword up to the next
    /// recognized section header.
    pub fn extract_section(&self, text: &str, section: ResumeSection) -> Option<String> {
        let pattern = self
            .section_patterns
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, re)| re)?;

        let start = pattern.find(text)?.start();

        // Look for the next section header past a small window, so a header
        // word inside the section body doesn't cut it short immediately
        let window = char_boundary_at(text, start + 100);
        let end = self
            .section_patterns
            .iter()
            .filter(|(s, _)| *s != section)
            .filter_map(|(_, re)| re.find(&text[window..]).map(|m| window + m.start()))
            .min()
            .unwrap_or(text.len());

        let content = text[start..end].trim();
        if content.is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }

    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
            "by", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
            "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
            "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me",
            "him", "her", "us", "them", "my", "your", "his", "our", "their",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn char_boundary_at(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
