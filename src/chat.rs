//! Health assistant chat: one-shot questions forwarded to the hosted model
//! with a plain-text system prompt.

use crate::config::ChatSettings;
use crate::llm::{ChatCompletionRequest, ChatMessage, GroqClient, LlmClient};

pub const SYSTEM_PROMPT: &str = "You are NutriCare AI. Answer in plain text only. \
Do not use markdown, bolding, or special characters.";

pub const MISSING_KEY_REPLY: &str = "System Error: AI Key missing.";
pub const OFFLINE_REPLY: &str = "I am currently offline. Please check your internet connection.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 200;

pub struct ChatService {
    client: Option<Box<dyn LlmClient>>,
    model: String,
}

impl ChatService {
    pub fn new(client: Option<Box<dyn LlmClient>>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    /// Build from settings. No API key leaves the service disabled.
    pub fn from_settings(settings: &ChatSettings) -> Self {
        let client = settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .and_then(|key| {
                match GroqClient::new(&settings.base_url, key, settings.timeout_secs) {
                    Ok(client) => Some(Box::new(client) as Box<dyn LlmClient>),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to build chat client");
                        None
                    }
                }
            });
        Self::new(client, &settings.model)
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Answer a user message. Never fails: problems become fixed replies.
    /// Blocks on the network; call from `spawn_blocking`.
    pub fn reply(&self, message: &str) -> String {
        let Some(client) = self.client.as_ref() else {
            return MISSING_KEY_REPLY.to_string();
        };

        tracing::info!(chars = message.chars().count(), model = %self.model, "Chat message");

        match client.complete(&self.build_request(message)) {
            Ok(raw) => clean_reply(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "Chat provider call failed");
                OFFLINE_REPLY.to_string()
            }
        }
    }
}

/// Strip markdown emphasis the model emits despite the prompt.
pub fn clean_reply(raw: &str) -> String {
    raw.replace('*', "")
}
