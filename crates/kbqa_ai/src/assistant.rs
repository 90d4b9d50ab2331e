use std::sync::Arc;

use kbqa_core::config::Settings;
use kbqa_core::corpus::{assemble_corpus, DocumentSource};
use kbqa_core::demo::{canned_answer, CONTACT_EMAIL};
use kbqa_core::error::AppError;
use kbqa_core::intent::{classify, Intent};
use serde::Serialize;

use crate::answer::synthesize_answer;
use crate::backend::Backend;
use crate::evidence::{Candidate, Index};
use crate::expand::expand_queries;
use crate::rerank::rerank;
use crate::retrieve::retrieve_union;

/// Returned when synthesis produced nothing.
pub fn fallback_message() -> String {
    format!(
        "I don't have that exact detail on hand. Share product, sizes/grade, quantity, and delivery city, \
and I'll guide you, or email {CONTACT_EMAIL} for a formal quote."
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Greeting,
    Thanks,
    /// Offline canned-table answer.
    Canned,
    /// Live retrieval and synthesis.
    Grounded,
    /// Live synthesis came back empty.
    Fallback,
}

/// Observations from one question. Never used for control flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetrievalDiagnostics {
    pub variants: usize,
    pub pool_size: usize,
    pub top_similarity: Option<f32>,
    pub low_similarity: bool,
    pub excerpts: usize,
}

impl RetrievalDiagnostics {
    pub fn from_pool(pool: &[Candidate<'_>], threshold: f32) -> Self {
        let top_similarity = pool.iter().map(|c| c.score).reduce(f32::max);
        Self {
            pool_size: pool.len(),
            top_similarity,
            low_similarity: top_similarity.is_some_and(|s| s < threshold),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub route: Route,
    pub diagnostics: RetrievalDiagnostics,
}

impl Reply {
    fn simple(text: impl Into<String>, route: Route) -> Self {
        Self {
            text: text.into(),
            route,
            diagnostics: RetrievalDiagnostics::default(),
        }
    }
}

/// Runs the per-question pipeline against a shared, read-only index.
///
/// Holds no per-question state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Assistant {
    backend: Backend,
    settings: Settings,
    index: Arc<Index>,
}

impl Assistant {
    pub fn new(backend: Backend, settings: Settings, index: Arc<Index>) -> Self {
        Self {
            backend,
            settings,
            index,
        }
    }

    /// Load every document, chunk and embed once. Missing or empty sources
    /// are fatal.
    pub fn from_source(
        backend: Backend,
        settings: Settings,
        source: &dyn DocumentSource,
    ) -> Result<Self, AppError> {
        let corpus = assemble_corpus(source)?;
        let index = Index::build(&backend, &settings, &corpus)?;
        Ok(Self::new(backend, settings, Arc::new(index)))
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn index(&self) -> &Arc<Index> {
        &self.index
    }

    pub fn ask(&self, question: &str) -> Result<Reply, AppError> {
        tracing::debug!(mode = self.backend.mode_label(), question, "question received");

        if let Some(intent) = classify(question) {
            let route = match intent {
                Intent::Greeting => Route::Greeting,
                Intent::Thanks => Route::Thanks,
            };
            return Ok(Reply::simple(intent.reply(), route));
        }

        if self.backend.is_offline() {
            return Ok(Reply::simple(canned_answer(question), Route::Canned));
        }

        let variants = expand_queries(&self.backend, &self.settings, question)?;
        let pool = retrieve_union(&self.backend, &self.settings, &variants, &self.index)?;

        let mut diagnostics = RetrievalDiagnostics::from_pool(&pool, self.settings.sim_threshold_log);
        diagnostics.variants = variants.len();
        tracing::debug!(
            variants = diagnostics.variants,
            pool = diagnostics.pool_size,
            top_sim = diagnostics.top_similarity,
            "retrieval pool"
        );
        if diagnostics.low_similarity {
            tracing::warn!(
                top_sim = diagnostics.top_similarity,
                threshold = self.settings.sim_threshold_log,
                "low similarity; answer may need a clarifying question"
            );
        }

        let excerpts = rerank(&self.backend, &self.settings, question, &pool)?;
        diagnostics.excerpts = excerpts.len();

        let text = synthesize_answer(&self.backend, question, &excerpts)?;
        if text.is_empty() {
            return Ok(Reply {
                text: fallback_message(),
                route: Route::Fallback,
                diagnostics,
            });
        }
        Ok(Reply {
            text,
            route: Route::Grounded,
            diagnostics,
        })
    }

    /// Convenience wrapper returning only the reply text.
    pub fn ask_text(&self, question: &str) -> Result<String, AppError> {
        self.ask(question).map(|r| r.text)
    }
}
