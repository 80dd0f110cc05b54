//! Remote embedding generation

pub mod client;

pub use client::EmbeddingClient;

/// Fixed-length numeric representation of a text, produced by the remote
/// embedding model. Never mutated after creation.
pub type EmbeddingVector = Vec<f32>;
