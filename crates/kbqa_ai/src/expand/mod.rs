use std::collections::HashSet;

use kbqa_core::config::Settings;
use kbqa_core::error::AppError;
use kbqa_core::normalize::normalize_query;

use crate::backend::Backend;
use crate::prompts;

/// Fewer parsed lines than this and the raw reply is re-split on semicolons.
const MIN_PARSED_LINES: usize = 3;
const OFFLINE_MAX_VARIANTS: usize = 4;
const LEADING_TRAILING_BULLETS: &[char] = &[' ', '-', '•', '*', '\t'];

/// Naive keyword substitutions used when no model is available.
const OFFLINE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("delivery time", "lead time"),
    ("beams", "wide flange"),
];

/// Reformulate a question into several normalized search variants.
///
/// Live mode makes exactly one generation call; offline mode makes none.
/// The result is never empty and holds no two variants with the same
/// normalized form.
pub fn expand_queries(
    backend: &Backend,
    settings: &Settings,
    question: &str,
) -> Result<Vec<String>, AppError> {
    match backend {
        Backend::Offline => Ok(offline_variants(question)),
        Backend::Live { llm, models, .. } => {
            let raw = llm.generate(
                &models.expand,
                &prompts::expansion_prompt(question),
                Some(settings.max_completion_tokens),
            )?;
            Ok(variants_from_reply(question, &raw, settings.max_variants))
        }
    }
}

/// Parse a generated list of reformulations. Never fails: unusable output
/// degrades to the question itself.
pub fn variants_from_reply(question: &str, raw: &str, max_variants: usize) -> Vec<String> {
    let text = raw.trim();
    let mut lines = split_clean(text.split('\n'));
    if lines.len() < MIN_PARSED_LINES {
        tracing::debug!(parsed = lines.len(), "expansion reply too short; re-splitting on semicolons");
        lines = split_clean(text.split(|c: char| c == ';' || c == '\n'));
    }

    lines.push(question.to_string());
    lines.push(normalize_query(question));

    let out = dedup_normalized(lines, max_variants);
    if out.is_empty() {
        return vec![normalize_query(question)];
    }
    out
}

pub fn offline_variants(question: &str) -> Vec<String> {
    let q = normalize_query(question);
    let mut candidates = vec![question.to_string(), q.clone()];
    for (from, to) in OFFLINE_SUBSTITUTIONS {
        if q.contains(from) {
            candidates.push(q.replace(from, to));
        }
    }

    let out = dedup_normalized(candidates, OFFLINE_MAX_VARIANTS);
    if out.is_empty() {
        return vec![q];
    }
    out
}

fn split_clean<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(|p| p.trim().trim_matches(LEADING_TRAILING_BULLETS).trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize, drop empties and repeats (first appearance wins), then cap.
fn dedup_normalized(items: Vec<String>, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let n = normalize_query(&item);
        if !n.is_empty() && seen.insert(n.clone()) {
            out.push(n);
        }
    }
    out.truncate(max);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullets_and_dedups() {
        let raw = "- Rebar sizes\n• rebar   SIZES\n* reinforcing bar diameters\n\n  rebar catalog  ";
        let v = variants_from_reply("What rebar sizes?", raw, 6);
        assert_eq!(
            v,
            vec![
                "rebar sizes",
                "reinforcing bar diameters",
                "rebar catalog",
                "what rebar sizes?",
            ]
        );
    }

    #[test]
    fn falls_back_to_semicolons() {
        let v = variants_from_reply("q", "alpha; beta; gamma", 6);
        assert_eq!(v, vec!["alpha", "beta", "gamma", "q"]);
    }

    #[test]
    fn empty_reply_still_yields_question() {
        assert_eq!(variants_from_reply("Lead Time?", "", 6), vec!["lead time?"]);
        assert_eq!(variants_from_reply("   ", "   ", 6), vec![""]);
    }

    #[test]
    fn offline_applies_substitutions() {
        let v = offline_variants("Delivery time for BEAMS");
        assert_eq!(
            v,
            vec![
                "delivery time for beams",
                "lead time for beams",
                "delivery time for wide flange",
            ]
        );
    }
}
