use std::collections::HashSet;

use kbqa_core::config::Settings;
use kbqa_core::error::AppError;
use kbqa_core::normalize::leading_words_signature;

use crate::backend::Backend;
use crate::evidence::Candidate;
use crate::prompts;

const SNIPPET_CHARS: usize = 400;
/// Excerpts whose first this-many words match are duplicates.
pub const SIGNATURE_WORDS: usize = 20;

/// Ask the model to pick the best `retr_top_k` pool entries.
///
/// Offline, or with an empty pool, returns an empty list without any call.
/// A reply with no integer tokens falls back to the head of the pool, which is
/// already sorted by similarity. Indices past the pool end are skipped.
pub fn rerank<'a>(
    backend: &Backend,
    settings: &Settings,
    question: &str,
    pool: &[Candidate<'a>],
) -> Result<Vec<&'a str>, AppError> {
    let (llm, models) = match backend {
        Backend::Live { llm, models, .. } => (llm, models),
        Backend::Offline => return Ok(Vec::new()),
    };
    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = prompts::rerank_prompt(question, settings.retr_top_k, &build_previews(pool));
    let raw = llm.generate(&models.expand, &prompt, Some(settings.max_completion_tokens))?;

    let mut picked = parse_ranked_indices(&raw, settings.retr_top_k);
    if picked.is_empty() {
        tracing::warn!(reply = %raw.trim(), "rerank reply had no usable indices; using pool order");
        picked = (0..settings.retr_top_k.min(pool.len())).collect();
    }

    let texts = picked.into_iter().filter_map(|i| pool.get(i).map(|c| c.text));
    Ok(dedup_by_signature(texts))
}

/// One line per pool entry: index, raw score and a single-line snippet.
pub fn build_previews(pool: &[Candidate<'_>]) -> String {
    pool.iter()
        .enumerate()
        .map(|(i, c)| {
            let snippet: String = c
                .text
                .chars()
                .take(SNIPPET_CHARS)
                .map(|ch| if ch == '\n' { ' ' } else { ch })
                .collect();
            format!("[{i}] score={:.3} :: {snippet}", c.score)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read comma-separated indices left to right, keeping at most `top_k`.
///
/// Tokens that are not plain non-negative integers are skipped. Range is not
/// checked here; an index too large for `usize` saturates so it still counts.
pub fn parse_ranked_indices(raw: &str, top_k: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for tok in raw.split(',') {
        if out.len() == top_k {
            break;
        }
        let tok = tok.trim();
        if tok.is_empty() || !tok.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        out.push(tok.parse::<usize>().unwrap_or(usize::MAX));
    }
    out
}

/// Keep the first excerpt of every leading-words signature, in order.
pub fn dedup_by_signature<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    texts
        .into_iter()
        .filter(|t| seen.insert(leading_words_signature(t, SIGNATURE_WORDS)))
        .collect()
}
