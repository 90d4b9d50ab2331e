use std::fmt;
use std::sync::Arc;

use kbqa_core::config::{ModelIds, Mode};
use kbqa_core::error::AppError;

use crate::embeddings::openai_embed::OpenAiEmbedder;
use crate::embeddings::Embedder;
use crate::llm::openai_llm::OpenAiLlm;
use crate::llm::Llm;
use crate::openai::OpenAiClient;

/// Resolved collaborators for one operating mode. Every stage receives this
/// and branches on it, instead of consulting a global flag.
#[derive(Clone)]
pub enum Backend {
    Live {
        llm: Arc<dyn Llm>,
        embedder: Arc<dyn Embedder>,
        models: ModelIds,
    },
    Offline,
}

impl Backend {
    pub fn from_mode(mode: &Mode) -> Result<Self, AppError> {
        match mode {
            Mode::Offline => Ok(Backend::Offline),
            Mode::Live {
                credentials,
                models,
            } => {
                let client = OpenAiClient::new(&credentials.base_url, &credentials.api_key)?;
                Ok(Backend::Live {
                    llm: Arc::new(OpenAiLlm::new(client.clone())),
                    embedder: Arc::new(OpenAiEmbedder::new(client)),
                    models: models.clone(),
                })
            }
        }
    }

    pub fn live(llm: Arc<dyn Llm>, embedder: Arc<dyn Embedder>, models: ModelIds) -> Self {
        Backend::Live {
            llm,
            embedder,
            models,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Backend::Offline)
    }

    pub fn mode_label(&self) -> &'static str {
        match self {
            Backend::Live { .. } => "live",
            Backend::Offline => "offline",
        }
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Live { models, .. } => {
                f.debug_struct("Live").field("models", models).finish_non_exhaustive()
            }
            Backend::Offline => f.write_str("Offline"),
        }
    }
}
