use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, GenerationId};

/// Request for one piece of diary artwork.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePrompt {
    pub prompt: String,
    pub style: String,
    pub aspect_ratio: String,
}

impl ImagePrompt {
    pub fn watercolor(prompt: String) -> Self {
        Self {
            prompt,
            style: "watercolor".to_string(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub generation_id: GenerationId,
    pub public_url: String,
    pub prompt_used: String,
}

/// Free-text generation collaborator: prompt in, prose out. Opaque to the
/// rest of the domain.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Artwork generation collaborator; rendering and blob upload happen behind
/// this seam, only the public URL comes back.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &ImagePrompt) -> Result<GeneratedImage, DomainError>;
}
