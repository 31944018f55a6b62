//! Client for a hosted text-generation endpoint.
//!
//! Speaks the Hugging Face inference API shape: POST a JSON payload with the
//! prompt, receive a list of generations. The assistant treats every failure
//! as soft — the caller falls back to its rule-based answer.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Full model endpoint URL.
    pub endpoint: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum InferenceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("empty generation")]
    EmptyGeneration,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) struct InferenceClient {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub(crate) fn new(config: InferenceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, config })
    }

    pub(crate) async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": 150,
                "temperature": 0.7,
                "return_full_text": false,
            },
            "options": { "wait_for_model": true, "use_cache": true },
        });

        let mut request = self.client.post(&self.config.endpoint).json(&payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Server { status, message });
        }

        let generations: Vec<Generation> = response.json().await?;
        generations
            .into_iter()
            .find_map(|g| g.generated_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(InferenceError::EmptyGeneration)
    }
}
