//! Job posting data model and source clients

pub mod adzuna;
pub mod posting;
