use serde::{Deserialize, Serialize};

/// A pooled retrieval hit. Borrows its text from the shared index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate<'a> {
    pub chunk_index: usize,
    pub text: &'a str,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexStatus {
    pub chunk_count: usize,
    pub avg_chunk_chars: usize,
    pub dims: usize,
    /// Embedding model the vectors came from; `None` for offline zero vectors.
    pub model: Option<String>,
    pub content_sha256: String,
}
