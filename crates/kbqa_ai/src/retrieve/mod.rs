use kbqa_core::config::Settings;
use kbqa_core::error::AppError;

use crate::backend::Backend;
use crate::evidence::{embed_texts, Candidate, Index};

pub mod similarity;

/// Pool candidates across all query variants.
///
/// Every variant contributes its own top `pool_per_variant` chunks; the union
/// keeps duplicates, is sorted by descending score and capped at
/// `rerank_pool_max`. Offline this returns an empty pool without any call.
pub fn retrieve_union<'a>(
    backend: &Backend,
    settings: &Settings,
    variants: &[String],
    index: &'a Index,
) -> Result<Vec<Candidate<'a>>, AppError> {
    if backend.is_offline() || variants.is_empty() || index.is_empty() {
        return Ok(Vec::new());
    }

    let query_vectors = embed_texts(backend, settings, variants)?;
    let mut pool: Vec<Candidate<'a>> = Vec::new();
    for qv in query_vectors.iter() {
        pool.extend(top_for_variant(qv, index, settings.pool_per_variant)?);
    }

    // Stable sort: equal scores keep variant order, then chunk order.
    pool.sort_by(|a, b| b.score.total_cmp(&a.score));
    pool.truncate(settings.rerank_pool_max);
    Ok(pool)
}

/// Top `k` chunks for one unit query vector, best first.
pub fn top_for_variant<'a>(
    query: &[f32],
    index: &'a Index,
    k: usize,
) -> Result<Vec<Candidate<'a>>, AppError> {
    if query.len() != index.dims() {
        return Err(AppError::new(
            "AI_RETRIEVAL_FAILED",
            "Query embedding dims do not match index dims",
        )
        .with_details(format!("index_dims={}; query_dims={}", index.dims(), query.len())));
    }

    let mut scored: Vec<(usize, f32)> = index
        .vectors()
        .iter()
        .enumerate()
        .map(|(i, v)| (i, similarity::dot(query, v)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(k);

    let chunks = index.chunks();
    Ok(scored
        .into_iter()
        .map(|(i, score)| Candidate {
            chunk_index: i,
            text: chunks[i].as_str(),
            score,
        })
        .collect())
}
