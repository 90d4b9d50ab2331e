use kbqa_core::error::AppError;

/// Turns a batch of texts into one vector per input, in input order.
pub trait Embedder: Send + Sync {
    fn embed(&self, model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError>;
}

pub mod openai_embed;
