use kbqa_core::config::Settings;
use kbqa_core::error::AppError;
use sha2::{Digest, Sha256};

use super::chunking::chunk_text;
use super::model::IndexStatus;
use crate::backend::Backend;
use crate::retrieve::similarity::normalize_in_place;

/// Embed a batch of texts and L2-normalize every row.
///
/// Offline, no call is made: each text gets a zero vector of the configured
/// width, which keeps shapes valid while retrieval stays unused.
pub fn embed_texts(
    backend: &Backend,
    settings: &Settings,
    texts: &[String],
) -> Result<Vec<Vec<f32>>, AppError> {
    let mut vectors = match backend {
        Backend::Offline => vec![vec![0.0f32; settings.embed_dims]; texts.len()],
        Backend::Live {
            embedder, models, ..
        } => embedder.embed(&models.embedding, texts)?,
    };

    if vectors.len() != texts.len() {
        return Err(AppError::new(
            "AI_EMBEDDINGS_FAILED",
            "Embedder returned a different number of vectors than inputs",
        )
        .with_details(format!("inputs={}; vectors={}", texts.len(), vectors.len())));
    }
    if let Some(first) = vectors.first() {
        let dims = first.len();
        if let Some(bad) = vectors.iter().position(|v| v.len() != dims) {
            return Err(AppError::new(
                "AI_EMBEDDINGS_FAILED",
                "Embedder returned vectors of mixed dimensions",
            )
            .with_details(format!("expected={dims}; row={bad}; got={}", vectors[bad].len())));
        }
    }

    if let Some(bad) = first_non_finite_row(&vectors) {
        return Err(AppError::new(
            "AI_EMBEDDINGS_FAILED",
            "Embedder returned a vector with non-finite components",
        )
        .with_details(format!("row={bad}")));
    }

    for v in vectors.iter_mut() {
        normalize_in_place(v);
    }
    Ok(vectors)
}

/// Chunks paired with their unit vectors. Built once, then only read.
#[derive(Debug, Clone)]
pub struct Index {
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
    status: IndexStatus,
}

impl Index {
    /// Chunk the corpus and embed every chunk in one batch.
    pub fn build(backend: &Backend, settings: &Settings, corpus: &str) -> Result<Self, AppError> {
        let chunks = chunk_text(corpus, settings.chunk_size, settings.chunk_overlap);
        let chunks: Vec<String> = chunks.into_iter().filter(|c| !c.trim().is_empty()).collect();
        if chunks.is_empty() {
            return Err(AppError::new(
                "CORPUS_EMPTY",
                "No documentation found; corpus produced no chunks",
            ));
        }
        Self::from_chunks(backend, settings, chunks)
    }

    pub fn from_chunks(
        backend: &Backend,
        settings: &Settings,
        chunks: Vec<String>,
    ) -> Result<Self, AppError> {
        let vectors = embed_texts(backend, settings, &chunks)?;
        let model = match backend {
            Backend::Live { models, .. } => Some(models.embedding.clone()),
            Backend::Offline => None,
        };
        let index = Self::assemble(chunks, vectors, model)?;

        let st = &index.status;
        tracing::info!(
            mode = backend.mode_label(),
            chunks = st.chunk_count,
            avg_chars = st.avg_chunk_chars,
            dims = st.dims,
            content_sha256 = %st.content_sha256,
            "built retrieval index"
        );
        Ok(index)
    }

    /// Pair pre-computed vectors with their chunks. Vectors are not renormalized.
    pub fn from_parts(chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self, AppError> {
        Self::assemble(chunks, vectors, None)
    }

    fn assemble(
        chunks: Vec<String>,
        vectors: Vec<Vec<f32>>,
        model: Option<String>,
    ) -> Result<Self, AppError> {
        if chunks.len() != vectors.len() {
            return Err(AppError::new(
                "AI_INDEX_INVALID",
                "Index chunk and vector counts differ",
            )
            .with_details(format!("chunks={}; vectors={}", chunks.len(), vectors.len())));
        }
        let dims = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = vectors.iter().position(|v| v.len() != dims) {
            return Err(AppError::new("AI_INDEX_INVALID", "Index vector dims mismatch")
                .with_details(format!("expected={dims}; row={bad}; got={}", vectors[bad].len())));
        }
        if let Some(bad) = first_non_finite_row(&vectors) {
            return Err(AppError::new("AI_INDEX_INVALID", "Index vector is not finite")
                .with_details(format!("row={bad}")));
        }

        let total_chars: usize = chunks.iter().map(|c| c.chars().count()).sum();
        let avg_chunk_chars = if chunks.is_empty() {
            0
        } else {
            total_chars / chunks.len()
        };

        let status = IndexStatus {
            chunk_count: chunks.len(),
            avg_chunk_chars,
            dims,
            model,
            content_sha256: content_fingerprint(&chunks),
        };
        Ok(Self {
            chunks,
            vectors,
            status,
        })
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.status.dims
    }

    pub fn status(&self) -> &IndexStatus {
        &self.status
    }
}

fn first_non_finite_row(vectors: &[Vec<f32>]) -> Option<usize> {
    vectors
        .iter()
        .position(|v| v.iter().any(|x| !x.is_finite()))
}

fn content_fingerprint(chunks: &[String]) -> String {
    let mut hasher = Sha256::new();
    for c in chunks {
        hasher.update(c.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
