use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,

    #[error("Provider not implemented: {0}")]
    NotImplemented(String),
}

/// External embedding model seam.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Serialize)]
struct OllamaEmbeddingRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct OpenAiEmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
}

/// HTTP-backed provider speaking either the Ollama or the OpenAI embedding
/// protocol, selected by `provider` name.
pub struct HttpEmbeddingProvider {
    provider: String,
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpEmbeddingProvider {
    pub fn new(
        provider: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            provider: provider.into().to_lowercase(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn embed_ollama(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = OllamaEmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(EmbeddingError::Http)?
            .json::<OllamaEmbeddingResponse>()
            .await?;

        Ok(response.embedding)
    }

    async fn embed_openai(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| EmbeddingError::InvalidResponse("API key required".to_string()))?;

        let request = OpenAiEmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(EmbeddingError::Http)?
            .json::<OpenAiEmbeddingResponse>()
            .await?;

        response
            .data
            .first()
            .map(|d| d.embedding.clone())
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding in response".to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }
        match self.provider.as_str() {
            "ollama" => self.embed_ollama(text).await,
            "openai" => self.embed_openai(text).await,
            other => Err(EmbeddingError::NotImplemented(other.to_string())),
        }
    }
}
