use kbqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct OpenAiLlm {
    client: OpenAiClient,
}

impl OpenAiLlm {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ResponsesResponse {
    /// Concatenate every `output_text` part across all output items.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect()
    }
}

impl Llm for OpenAiLlm {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        let req = ResponsesRequest {
            model,
            input: prompt,
            max_output_tokens,
        };
        let body = serde_json::to_value(req).map_err(|e| {
            AppError::new("AI_GENERATE_FAILED", "Failed to encode generation request")
                .with_details(e.to_string())
        })?;
        let resp = self.client.post_json("responses", body, "AI_GENERATE_FAILED")?;
        let v: ResponsesResponse = resp.into_json().map_err(|e| {
            AppError::new("AI_GENERATE_FAILED", "Failed to decode generation response")
                .with_details(e.to_string())
        })?;

        // An empty reply is not an error; callers decide how to degrade.
        Ok(v.output_text())
    }
}
