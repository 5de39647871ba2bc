use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::GenerationClient;
use super::GenerationSettings;
use mirai_domain::generation::{GeneratedImage, ImageGenerator, ImagePrompt};
use mirai_domain::shared::{DomainError, GenerationId};

#[derive(Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    style: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    public_url: String,
}

/// Image-generation collaborator. Rendering and blob upload happen on the
/// remote side; only the public URL of the finished artwork comes back.
pub struct HttpImageGenerator {
    client: GenerationClient,
    endpoint: Url,
}

impl HttpImageGenerator {
    pub fn new(settings: &GenerationSettings) -> anyhow::Result<Self> {
        Ok(Self {
            client: GenerationClient::new(settings.api_key.clone(), settings.timeout)?,
            endpoint: settings.image_endpoint.clone(),
        })
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &ImagePrompt) -> Result<GeneratedImage, DomainError> {
        let generation_id = GenerationId::new();

        let response: ImageResponse = self
            .client
            .post_json(
                &self.endpoint,
                &ImageRequest {
                    prompt: &prompt.prompt,
                    style: &prompt.style,
                    aspect_ratio: &prompt.aspect_ratio,
                },
                "image generation",
            )
            .await?;

        info!(
            "[generation] image generated id={} url={}",
            generation_id, response.public_url
        );

        Ok(GeneratedImage {
            generation_id,
            public_url: response.public_url,
            prompt_used: prompt.prompt.clone(),
        })
    }
}
