//! HTTP client for an OpenAI-compatible chat completions endpoint.

use anyhow::{Context, Result};
use serde_json::json;
use std::{env, time::Duration};
use wealth_core::narrative::{NarrativeRequest, NarrativeService};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TEMPERATURE: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct NarratorSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl NarratorSettings {
    /// `None` when OPENAI_API_KEY is unset or blank.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("NARRATIVE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let timeout_secs = env::var("NARRATIVE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub struct ChatCompletionsNarrator {
    client: reqwest::blocking::Client,
    settings: NarratorSettings,
}

impl ChatCompletionsNarrator {
    pub fn new(settings: NarratorSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, settings })
    }
}

impl NarrativeService for ChatCompletionsNarrator {
    fn generate(&self, request: &NarrativeRequest) -> Result<String> {
        let body = json!({
            "model": self.settings.model,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
        });

        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        log::debug!("narrator: POST {url} model={}", self.settings.model);

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .context("sending chat completion request")?
            .error_for_status()?;
        let json: serde_json::Value = res.json().context("decoding chat completion response")?;
        completion_text(&json).map(str::to_string)
    }
}

/// Text of the first choice in a chat completion response.
fn completion_text(response: &serde_json::Value) -> Result<&str> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .context("Failed to parse content from chat completion response")
}
