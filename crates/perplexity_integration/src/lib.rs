//! Chat-completions client for the Perplexity API, used as the refinement
//! [`Generator`].

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use refine_core::Generator;
use reqwest::Client;
use shared::error::GenerationError;
use tracing::{debug, warn};
use url::Url;

pub mod config;
mod response;

pub use config::{load_settings_from, Settings};
pub use response::strip_reasoning;

use response::{
    extract_text, map_http_error, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};

#[derive(Clone)]
pub struct PerplexityClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl PerplexityClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "Perplexity API key is required; set PERPLEXITY_API_KEY or api_key in {}",
                    config::DEFAULT_SETTINGS_PATH
                )
            })?
            .to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: settings.chat_completions_url()?,
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Generator for PerplexityClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_instruction,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, endpoint = %self.endpoint, "sending chat completion");
        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, timeout = err.is_timeout(), "Perplexity request failed");
                GenerationError::transport(format!("Perplexity API request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read Perplexity error body".to_string());
            warn!(%status, "Perplexity returned an error status");
            return Err(map_http_error(status, body));
        }

        let body = response.text().await.map_err(|err| {
            GenerationError::transport(format!("failed to read Perplexity response: {err}"))
        })?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|err| {
            GenerationError::upstream(
                Some(status.as_u16()),
                format!("failed to parse Perplexity response: {err}"),
            )
        })?;

        let content = extract_text(parsed).ok_or_else(|| {
            GenerationError::upstream(
                Some(status.as_u16()),
                "Perplexity API returned no content in the response",
            )
        })?;

        let post = strip_reasoning(&content);
        if post.is_empty() {
            return Err(GenerationError::upstream(
                Some(status.as_u16()),
                "Perplexity API returned an empty post",
            ));
        }
        debug!(chars = post.chars().count(), "chat completion received");
        Ok(post)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
