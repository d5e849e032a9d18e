use std::sync::Mutex;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, LlmClient};
use super::ChatError;

/// Blocking HTTP client for Groq's OpenAI-compatible chat endpoint.
pub struct GroqClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GroqClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, ChatError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ChatError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.base_url)
    }
}

impl LlmClient for GroqClient {
    fn complete(&self, request: &ChatCompletionRequest) -> Result<String, ChatError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ChatError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ChatError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    ChatError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| ChatError::ResponseParsing(e.to_string()))?;

        parsed.into_first_content()
    }
}

/// Mock client for tests. Records every request it receives.
pub struct MockLlmClient {
    response: Option<String>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails as if the network were down.
    pub fn offline() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl LlmClient for MockLlmClient {
    fn complete(&self, request: &ChatCompletionRequest) -> Result<String, ChatError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        self.response
            .clone()
            .ok_or_else(|| ChatError::Connection("mock".to_string()))
    }
}
