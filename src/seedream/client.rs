//! Thin HTTP client for the Seedream image-generation API.
//!
//! - `generate_images` posts a generation request to `/images/generations`.
//! - `fetch_image` downloads a produced image and returns raw bytes.
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::{AppError, AppResult};
use crate::seedream::types::{ImageGenerationRequest, ImageGenerationResponse};

#[derive(Clone)]
pub struct SeedreamClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl SeedreamClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(SeedreamClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a generation request.
    ///
    /// Non-2xx answers become `AppError::Seedream` carrying status and body.
    pub async fn generate_images(&self, request: &ImageGenerationRequest) -> AppResult<ImageGenerationResponse> {
        let url = format!("{}/images/generations", self.base_url);
        tracing::debug!(
            model = %request.model,
            size = %request.size,
            sequential = %request.sequential_image_generation,
            image_to_image = request.image.is_some(),
            "POST {}", url
        );

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("Generation failed. Status: {}, Body: {}", status, error_body);
            tracing::error!("{}", error_message);
            Err(AppError::Seedream(error_message))
        }
    }

    /// Download an image; returns the bytes and the reported content type.
    pub async fn fetch_image(&self, url: &str) -> AppResult<(Vec<u8>, Option<String>)> {
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let bytes = response.bytes().await?;
            Ok((bytes.to_vec(), content_type))
        } else {
            Err(AppError::Seedream(format!("Failed to fetch image: {:?}", response.status())))
        }
    }
}
