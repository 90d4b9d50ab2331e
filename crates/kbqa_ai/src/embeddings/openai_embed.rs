use kbqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: OpenAiClient,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let req = EmbeddingsRequest { model, input: inputs };
        let body = serde_json::to_value(req).map_err(|e| {
            AppError::new("AI_EMBEDDINGS_FAILED", "Failed to encode embeddings request")
                .with_details(e.to_string())
        })?;
        let resp = self.client.post_json("embeddings", body, "AI_EMBEDDINGS_FAILED")?;
        let mut v: EmbeddingsResponse = resp.into_json().map_err(|e| {
            AppError::new("AI_EMBEDDINGS_FAILED", "Failed to decode embeddings response")
                .with_details(e.to_string())
        })?;

        if v.data.len() != inputs.len() {
            return Err(AppError::new(
                "AI_EMBEDDINGS_FAILED",
                "Embeddings response row count does not match input count",
            )
            .with_details(format!("inputs={}; rows={}", inputs.len(), v.data.len())));
        }
        // Rows are keyed by input position; do not rely on response order.
        v.data.sort_by_key(|row| row.index);
        if v.data.iter().enumerate().any(|(i, row)| row.index != i) {
            return Err(AppError::new(
                "AI_EMBEDDINGS_FAILED",
                "Embeddings response indices are not a permutation of the inputs",
            ));
        }
        if v.data.iter().any(|row| row.embedding.is_empty()) {
            return Err(AppError::new(
                "AI_EMBEDDINGS_FAILED",
                "Embeddings response contained an empty vector",
            ));
        }

        Ok(v.data.into_iter().map(|row| row.embedding).collect())
    }
}
