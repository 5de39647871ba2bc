use std::time::Duration;

use url::Url;

mod client;
mod imagegen;
mod textgen;

pub use client::{GenerationClient, RetryConfig};
pub use imagegen::HttpImageGenerator;
pub use textgen::HttpTextGenerator;

/// Endpoints and credentials for the text/image generation collaborators.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub text_endpoint: Url,
    pub image_endpoint: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl GenerationSettings {
    pub fn new(text_endpoint: Url, image_endpoint: Url, api_key: String) -> Self {
        Self {
            text_endpoint,
            image_endpoint,
            api_key,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
