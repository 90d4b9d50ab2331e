use kbqa_core::error::AppError;

/// Text generation. `max_output_tokens` caps the reply where the caller wants it.
pub trait Llm: Send + Sync {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<String, AppError>;
}

pub mod openai_llm;
