//! Job matcher library

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod input;
pub mod jobs;
pub mod output;
pub mod processing;
pub mod recommender;

pub use config::Config;
pub use error::{JobMatcherError, Result};
