use kbqa_core::demo::canned_answer;
use kbqa_core::error::AppError;

use crate::backend::Backend;
use crate::prompts;

/// Produce the reply text from selected excerpts.
///
/// Live mode issues one generation call and returns its trimmed output, which
/// may be empty. Offline mode answers from the canned table and makes no call.
pub fn synthesize_answer(
    backend: &Backend,
    question: &str,
    excerpts: &[&str],
) -> Result<String, AppError> {
    match backend {
        Backend::Offline => Ok(canned_answer(question).to_string()),
        Backend::Live { llm, models, .. } => {
            let prompt = prompts::answer_prompt(question, &excerpt_block(excerpts));
            let out = llm.generate(&models.answer, &prompt, None)?;
            Ok(out.trim().to_string())
        }
    }
}

pub fn excerpt_block(excerpts: &[&str]) -> String {
    if excerpts.is_empty() {
        return prompts::NO_EXCERPTS_MARKER.to_string();
    }
    excerpts.join(prompts::EXCERPT_SEPARATOR)
}
