#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kbqa_ai::backend::Backend;
use kbqa_ai::embeddings::Embedder;
use kbqa_ai::llm::Llm;
use kbqa_core::config::{ModelIds, Settings};
use kbqa_core::error::AppError;

pub fn models() -> ModelIds {
    Settings::default().model_ids()
}

/// Answers by prompt kind and counts every call.
pub struct ScriptedLlm {
    pub expansion: String,
    pub selection: String,
    pub answer: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(expansion: &str, selection: &str, answer: &str) -> Self {
        Self {
            expansion: expansion.to_string(),
            selection: selection.to_string(),
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Llm for ScriptedLlm {
    fn generate(
        &self,
        _model: &str,
        prompt: &str,
        _max_output_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.starts_with("Rewrite the user's question") {
            Ok(self.expansion.clone())
        } else if prompt.starts_with("Select the most relevant excerpts") {
            Ok(self.selection.clone())
        } else {
            Ok(self.answer.clone())
        }
    }
}

/// Always fails the way a rejected API key does.
pub struct RejectingLlm;

impl Llm for RejectingLlm {
    fn generate(&self, _: &str, _: &str, _: Option<u32>) -> Result<String, AppError> {
        Err(AppError::new(
            kbqa_core::error::CREDENTIAL_INVALID,
            "API key was rejected by the service",
        ))
    }
}

/// One dimension per keyword; each component counts keyword occurrences.
pub struct KeywordEmbedder {
    keywords: Vec<&'static str>,
    batches: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            batches: AtomicUsize::new(0),
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl Embedder for KeywordEmbedder {
    fn embed(&self, _model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(inputs
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                self.keywords
                    .iter()
                    .map(|k| lower.matches(k).count() as f32)
                    .collect()
            })
            .collect())
    }
}

pub fn live(llm: Arc<dyn Llm>, embedder: Arc<dyn Embedder>) -> Backend {
    Backend::live(llm, embedder, models())
}

/// Returns the same rows for every batch, whatever the inputs.
pub struct FixedEmbedder(pub Vec<Vec<f32>>);

impl Embedder for FixedEmbedder {
    fn embed(&self, _model: &str, _inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        Ok(self.0.clone())
    }
}
