//! Boundary to the external completion model.
//!
//! [`Analyzer`] turns a sentence into an [`AnalysisResponse`] through any
//! [`CompletionClient`]; [`OpenAiClient`] is the production client for
//! OpenAI-compatible chat completion endpoints.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parsing::response_parser::parse_completion_content;
use crate::types::analysis_data::{AnalysisResponse, PromptConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub trait CompletionClient {
    /// Returns the model's message text for a system/user prompt pair.
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiClient {
    /// Builds a client from config, reading the API key from the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(config, api_key))
    }

    pub fn new(config: &Config, api_key: impl Into<String>) -> Self {
        OpenAiClient {
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
            temperature: self.temperature,
        };

        log::debug!("POST {} (model {})", self.endpoint, self.model);
        let response = ureq::post(&self.endpoint)
            .timeout(self.timeout)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    let body = response.into_string().unwrap_or_default();
                    Error::http(format!(
                        "{} returned HTTP {}: {}",
                        self.endpoint,
                        code,
                        body.trim()
                    ))
                }
                ureq::Error::Transport(transport) => Error::http(format!(
                    "Network error calling {}: {}",
                    self.endpoint, transport
                )),
            })?;

        let parsed: ChatResponse = response.into_json().map_err(|e| {
            Error::http(format!("Unreadable response from {}: {}", self.endpoint, e))
        })?;
        Ok(parsed.into_content())
    }
}

/// Sends sentences to a completion model and parses what comes back.
pub struct Analyzer<C> {
    client: C,
    prompts: PromptConfig,
}

impl<C: CompletionClient> Analyzer<C> {
    pub fn new(client: C, prompts: PromptConfig) -> Self {
        Analyzer { client, prompts }
    }

    /// Fails only for an empty sentence, invalid prompts or a failed call.
    /// Unusable model output is returned as a raw-only response.
    pub fn analyze(&self, sentence: &str) -> Result<AnalysisResponse> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(Error::invalid_input("please enter a sentence to analyze"));
        }
        self.prompts.validate()?;

        let user_prompt = self.prompts.render_user_prompt(sentence);
        let content = self.client.complete(&self.prompts.system_prompt, &user_prompt)?;
        Ok(parse_completion_content(sentence, &content))
    }
}
