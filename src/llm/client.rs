//! Text-generation capability and the Gemini REST client

use crate::config::SuggestionConfig;
use crate::error::{Result, ScreenerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An external service that turns a prompt into free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name used in logs
    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScreenerError::Generation(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from configuration; `None` when no API key is set
    pub fn from_config(config: &SuggestionConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };

        Self::new(
            api_key.to_string(),
            config.model.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScreenerError::Generation(format!(
                "Gemini returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: GenerateResponse = response.json().await?;
        body.text()
            .ok_or_else(|| ScreenerError::Generation("Gemini returned no text".to_string()))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "1. First\n"}, {"text": "2. Second"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.text().as_deref(), Some("1. First\n2. Second"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = SuggestionConfig::default();
        assert!(GeminiClient::from_config(&config).unwrap().is_none());

        let config = SuggestionConfig {
            api_key: Some("key".to_string()),
            endpoint: "https://example.invalid/v1beta/".to_string(),
            ..SuggestionConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap().unwrap();
        assert_eq!(
            client.url(),
            format!("https://example.invalid/v1beta/models/{}:generateContent", config.model)
        );
        assert_eq!(client.name(), config.model);
    }
}
