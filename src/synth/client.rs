use crate::config::SynthConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A text-generation model driven by a single prompt
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&mut self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// Client for a text-generation-inference style `/generate` endpoint
pub struct HttpGenerator {
    client: Client,
    url: String,
    max_new_tokens: u32,
    temperature: f32,
    max_attempts: usize,
}

impl HttpGenerator {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/generate", config.endpoint.trim_end_matches('/')),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            max_attempts: config.max_attempts.max(1),
        }
    }

    async fn send(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::Http(format!("{} returned {}: {}", self.url, status, detail)));
        }

        let generated: GenerateResponse = resp.json().await?;
        Ok(generated.generated_text)
    }
}

impl TextGenerator for HttpGenerator {
    async fn generate(&mut self, prompt: &str) -> Result<String> {
        let mut delay_ms = 750u64;
        let mut attempt = 0;

        loop {
            attempt += 1;
            ::log::debug!("Sending prompt to {} (attempt {})", self.url, attempt);

            match self.send(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.max_attempts => {
                    ::log::warn!("Generation attempt {} failed: {}", attempt, e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = (delay_ms * 7 / 4).min(5000);
                }
                Err(e) => {
                    ::log::error!("Exhausted {} generation attempts", self.max_attempts);
                    return Err(e);
                }
            }
        }
    }
}
