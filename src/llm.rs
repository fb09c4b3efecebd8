use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

const LLM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<Message<'a>>,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.openai_api_key.clone().ok_or_else(|| {
            AppError::ConfigError("OPENAI_API_KEY must be set to generate summaries".to_string())
        })?;
        let client = Client::builder().timeout(LLM_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.openai_base_url.trim_end_matches('/')
            ),
            api_key,
            model: config.openai_model.clone(),
            temperature: request_temperature(&config.openai_model, config.openai_temperature),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single user message and returns the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        info!(model = %self.model, prompt_chars = prompt.len(), "Calling chat completion API");
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(AppError::LlmError(format!(
                "chat completion returned {status}: {text}"
            )));
        }

        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| AppError::LlmError(format!("invalid JSON from LLM: {e}")))?;
        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?
            .to_string();

        debug!(reply_chars = reply.len(), "Chat completion received");
        Ok(reply)
    }
}

/// gpt-5 models only accept their default temperature, so nothing is sent
/// for them.
fn request_temperature(model: &str, configured: Option<f32>) -> Option<f32> {
    match configured {
        Some(temperature) if model.starts_with("gpt-5") => {
            warn!(
                model,
                temperature,
                "Model only supports its default temperature; ignoring OPENAI_TEMPERATURE"
            );
            None
        }
        other => other,
    }
}
