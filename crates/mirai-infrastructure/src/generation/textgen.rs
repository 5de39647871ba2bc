use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::GenerationClient;
use super::GenerationSettings;
use mirai_domain::generation::TextGenerator;
use mirai_domain::shared::DomainError;

#[derive(Serialize)]
struct TextRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct TextResponse {
    text: String,
}

/// Text-generation collaborator over a simple prompt-in/prose-out HTTP API.
pub struct HttpTextGenerator {
    client: GenerationClient,
    endpoint: Url,
}

impl HttpTextGenerator {
    pub fn new(settings: &GenerationSettings) -> anyhow::Result<Self> {
        Ok(Self {
            client: GenerationClient::new(settings.api_key.clone(), settings.timeout)?,
            endpoint: settings.text_endpoint.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let response: TextResponse = self
            .client
            .post_json(&self.endpoint, &TextRequest { prompt }, "text generation")
            .await?;

        info!(
            "[generation] text generated prompt_chars={} output_chars={}",
            prompt.chars().count(),
            response.text.chars().count()
        );

        Ok(response.text)
    }
}
