use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Tunables for chunking, retrieval and generation.
///
/// Every field has a default; a TOML document or environment lookup only
/// needs to carry the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Window length in characters. Zero or negative keeps the corpus whole.
    pub chunk_size: i64,
    pub chunk_overlap: usize,
    /// Excerpts handed to synthesis after rerank.
    pub retr_top_k: usize,
    pub pool_per_variant: usize,
    pub rerank_pool_max: usize,
    pub max_variants: usize,
    /// Log-only threshold; never changes control flow.
    pub sim_threshold_log: f32,
    pub model_expand: String,
    pub model_answer: String,
    pub embed_model: String,
    pub embed_dims: usize,
    pub max_completion_tokens: u32,
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: 1400,
            chunk_overlap: 200,
            retr_top_k: 5,
            pool_per_variant: 8,
            rerank_pool_max: 30,
            max_variants: 6,
            sim_threshold_log: 0.08,
            model_expand: "gpt-4o-mini".to_string(),
            model_answer: "gpt-4o-mini".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            embed_dims: 1536,
            max_completion_tokens: 200,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        let settings: Settings = toml::from_str(raw).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Failed to parse settings TOML")
                .with_details(e.to_string())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay values from an environment-style lookup (`CHUNK_SIZE`,
    /// `RETR_TOP_K`, `MODEL_ANSWER`, ...). Keys that are absent or blank keep
    /// their current value.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CHUNK_SIZE") {
            self.chunk_size = parse_var("CHUNK_SIZE", &v)?;
        }
        if let Some(v) = get("CHUNK_OVERLAP") {
            self.chunk_overlap = parse_var("CHUNK_OVERLAP", &v)?;
        }
        if let Some(v) = get("RETR_TOP_K") {
            self.retr_top_k = parse_var("RETR_TOP_K", &v)?;
        }
        if let Some(v) = get("POOL_PER_VARIANT") {
            self.pool_per_variant = parse_var("POOL_PER_VARIANT", &v)?;
        }
        if let Some(v) = get("RERANK_POOL_MAX") {
            self.rerank_pool_max = parse_var("RERANK_POOL_MAX", &v)?;
        }
        if let Some(v) = get("MAX_VARIANTS") {
            self.max_variants = parse_var("MAX_VARIANTS", &v)?;
        }
        if let Some(v) = get("SIM_THRESHOLD_LOG") {
            self.sim_threshold_log = parse_var("SIM_THRESHOLD_LOG", &v)?;
        }
        if let Some(v) = get("MODEL_GEN_EXPAND") {
            self.model_expand = v.trim().to_string();
        }
        if let Some(v) = get("MODEL_ANSWER") {
            self.model_answer = v.trim().to_string();
        }
        if let Some(v) = get("EMBED_MODEL") {
            self.embed_model = v.trim().to_string();
        }
        if let Some(v) = get("EMBED_DIMS") {
            self.embed_dims = parse_var("EMBED_DIMS", &v)?;
        }
        if let Some(v) = get("MAX_COMPLETION_TOKENS") {
            self.max_completion_tokens = parse_var("MAX_COMPLETION_TOKENS", &v)?;
        }
        if let Some(v) = get("OPENAI_BASE_URL") {
            self.api_base_url = v.trim().to_string();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let positive = [
            ("retr_top_k", self.retr_top_k),
            ("pool_per_variant", self.pool_per_variant),
            ("rerank_pool_max", self.rerank_pool_max),
            ("max_variants", self.max_variants),
            ("embed_dims", self.embed_dims),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(AppError::new("CONFIG_INVALID", "Setting must be at least 1")
                    .with_details(format!("key={key}")));
            }
        }
        if !self.sim_threshold_log.is_finite() {
            return Err(AppError::new("CONFIG_INVALID", "Similarity threshold must be finite")
                .with_details(format!("sim_threshold_log={}", self.sim_threshold_log)));
        }
        for (key, value) in [
            ("model_expand", &self.model_expand),
            ("model_answer", &self.model_answer),
            ("embed_model", &self.embed_model),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::new("CONFIG_INVALID", "Model identifier is required")
                    .with_details(format!("key={key}")));
            }
        }
        Ok(())
    }

    pub fn model_ids(&self) -> ModelIds {
        ModelIds {
            expand: self.model_expand.clone(),
            answer: self.model_answer.clone(),
            embedding: self.embed_model.clone(),
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        AppError::new("CONFIG_INVALID", "Failed to parse configuration value")
            .with_details(format!("key={key}; value={raw}; err={e}"))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelIds {
    /// Used for query expansion and rerank selection.
    pub expand: String,
    pub answer: String,
    pub embedding: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Operating mode, decided once at startup and passed to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Live {
        credentials: Credentials,
        models: ModelIds,
    },
    Offline,
}

impl Mode {
    /// A present, non-blank key selects live mode; anything else is offline.
    pub fn from_api_key(api_key: Option<&str>, settings: &Settings) -> Self {
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Mode::Live {
                credentials: Credentials {
                    api_key: key.to_string(),
                    base_url: settings.api_base_url.clone(),
                },
                models: settings.model_ids(),
            },
            None => Mode::Offline,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Mode::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_never_prints_the_key() {
        let mode = Mode::from_api_key(Some("sk-secret"), &Settings::default());
        let printed = format!("{mode:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn parse_var_reports_key() {
        let err = parse_var::<usize>("RETR_TOP_K", "five").expect_err("should fail");
        assert_eq!(err.code, "CONFIG_INVALID");
        assert!(err.details.unwrap_or_default().contains("RETR_TOP_K"));
    }
}
