use std::fmt;

use kbqa_core::error::{AppError, CREDENTIAL_INVALID};

/// Blocking client for an OpenAI-compatible HTTP API.
///
/// Calls carry no timeout and are never retried here; retry and cancellation
/// policy belongs to the caller.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::new("AI_CLIENT_INVALID", "API key is required"));
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            agent: ureq::AgentBuilder::new().build(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `{base_url}/{path}`. Non-2xx statuses are mapped to
    /// `failure_code`, except 401/403 which become `AI_CREDENTIAL_INVALID`.
    pub(crate) fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
        failure_code: &str,
    ) -> Result<ureq::Response, AppError> {
        let url = format!("{}/{}", self.base_url, path);
        self.agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(|e| map_call_error(e, failure_code, path))
    }

    /// Cheap authenticated probe so a boundary layer can tell a rejected key
    /// apart from an unreachable service.
    pub fn verify_credentials(&self) -> Result<(), AppError> {
        let url = format!("{}/models", self.base_url);
        self.agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .call()
            .map(|_| ())
            .map_err(|e| map_call_error(e, "AI_SERVICE_UNREACHABLE", "models"))
    }
}

fn map_call_error(err: ureq::Error, failure_code: &str, path: &str) -> AppError {
    match err {
        ureq::Error::Status(status @ (401 | 403), resp) => {
            AppError::new(CREDENTIAL_INVALID, "API key was rejected by the service")
                .with_details(format!("path={path}; status={status}; body={}", error_body(resp)))
        }
        ureq::Error::Status(status, resp) => {
            AppError::new(failure_code, "Model service returned an error status")
                .with_details(format!("path={path}; status={status}; body={}", error_body(resp)))
                .with_retryable(status == 429 || status >= 500)
        }
        ureq::Error::Transport(t) => {
            AppError::new(failure_code, "Failed to reach model service")
                .with_details(format!("path={path}; err={t}"))
                .with_retryable(true)
        }
    }
}

fn error_body(resp: ureq::Response) -> String {
    let body = resp.into_string().unwrap_or_default();
    body.chars().take(300).collect()
}

fn validate_base_url(base_url: &str) -> Result<(), AppError> {
    let invalid = |msg: &str| {
        AppError::new("AI_CLIENT_INVALID", msg.to_string())
            .with_details(format!("base_url={base_url}"))
    };

    let rest = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .ok_or_else(|| invalid("Base URL must start with http:// or https://"))?;

    let authority = rest.split('/').next().unwrap_or("");
    if authority.contains('@') {
        return Err(invalid("Base URL must not embed credentials"));
    }

    let (host, port) = if let Some(end) = authority.find(']') {
        (&authority[..=end], authority[end + 1..].strip_prefix(':'))
    } else {
        match authority.split_once(':') {
            Some((h, p)) => (h, Some(p)),
            None => (authority, None),
        }
    };
    if host.is_empty() {
        return Err(invalid("Base URL host is missing"));
    }
    if let Some(p) = port {
        match p.parse::<u16>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("Base URL port is invalid")),
        }
    }
    Ok(())
}
