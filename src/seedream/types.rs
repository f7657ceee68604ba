//! Request/response bodies for `POST <base>/images/generations`.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Inline image data for image-to-image generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sequential_image_generation: String,
    pub response_format: String,
    pub size: String,
    pub watermark: bool,
}

impl ImageGenerationRequest {
    /// Text-to-image request with URL responses and no watermark.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        ImageGenerationRequest {
            model: model.into(),
            prompt: prompt.into(),
            image: None,
            sequential_image_generation: "disabled".to_string(),
            response_format: "url".to_string(),
            size: "2K".to_string(),
            watermark: false,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_sequential(mut self, enabled: bool) -> Self {
        self.sequential_image_generation = if enabled { "enabled" } else { "disabled" }.to_string();
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageGenerationResponse {
    /// First non-empty image URL, if the API returned one.
    pub fn first_url(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|img| img.url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_image_for_text_to_image() {
        let req = ImageGenerationRequest::new("m", "a red chair").with_size("4K").with_sequential(true);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "model": "m",
                "prompt": "a red chair",
                "sequential_image_generation": "enabled",
                "response_format": "url",
                "size": "4K",
                "watermark": false
            })
        );
    }

    #[test]
    fn request_carries_inline_image() {
        let req = ImageGenerationRequest::new("m", "p").with_image(Some("data:image/png;base64,AAAA".into()));
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["image"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn response_tolerates_missing_urls() {
        let empty: ImageGenerationResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_url(), None);

        let no_url: ImageGenerationResponse = serde_json::from_value(json!({"data": [{}]})).unwrap();
        assert_eq!(no_url.first_url(), None);

        let ok: ImageGenerationResponse =
            serde_json::from_value(json!({"data": [{"url": "https://cdn.test/a.jpeg"}, {"url": "x"}]})).unwrap();
        assert_eq!(ok.first_url(), Some("https://cdn.test/a.jpeg"));
    }
}
