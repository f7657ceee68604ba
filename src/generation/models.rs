use serde::{Deserialize, Serialize};

use crate::prompt::scenes::SceneStyle;

/// One prompt to generate, consumed once by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptJob {
    pub text: String,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PromptJob {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        PromptJob { text: text.into(), index, title: None, description: None }
    }

    pub fn with_details(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.description = Some(description.into());
        self
    }

    /// Jobs indexed by position, without title metadata.
    pub fn from_texts<I, S>(texts: I) -> Vec<PromptJob>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts.into_iter().enumerate().map(|(i, t)| PromptJob::new(t, i)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum GenerationSpeed {
    Fast,
    #[default]
    Normal,
    Quality,
}

impl GenerationSpeed {
    /// Unknown keys are treated as `Normal`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "fast" => GenerationSpeed::Fast,
            "quality" => GenerationSpeed::Quality,
            _ => GenerationSpeed::Normal,
        }
    }

    pub fn sequential_generation(self) -> bool {
        self == GenerationSpeed::Quality
    }
}

impl From<String> for GenerationSpeed {
    fn from(key: String) -> Self {
        GenerationSpeed::from_key(&key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ImageQuality {
    #[serde(rename = "1K")]
    Low,
    #[default]
    #[serde(rename = "2K")]
    Standard,
    #[serde(rename = "4K")]
    High,
}

impl ImageQuality {
    /// Unknown keys are treated as `2K`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_uppercase().as_str() {
            "1K" => ImageQuality::Low,
            "4K" => ImageQuality::High,
            _ => ImageQuality::Standard,
        }
    }

    pub fn size(self) -> &'static str {
        match self {
            ImageQuality::Low => "1K",
            ImageQuality::Standard => "2K",
            ImageQuality::High => "4K",
        }
    }
}

impl From<String> for ImageQuality {
    fn from(key: String) -> Self {
        ImageQuality::from_key(&key)
    }
}

/// Per-request knobs; absent fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    pub scene_style: SceneStyle,
    pub generation_speed: GenerationSpeed,
    pub image_quality: ImageQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
}

impl GenerationOptions {
    pub fn product_description(&self) -> &str {
        self.product_description.as_deref().unwrap_or("")
    }
}

/// Request parameters actually sent upstream, echoed back on production results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub size: String,
    pub sequential_generation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    pub prompt: String,
    pub index: usize,
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_params: Option<GenerationParams>,
}

impl GenerationResult {
    /// Result skeleton for `job`; callers fill in the outcome.
    pub(crate) fn for_job(job: &PromptJob, image_url: String, demo_mode: bool, message: &str) -> Self {
        GenerationResult {
            success: true,
            image_url,
            image_base64: None,
            prompt: job.text.clone(),
            index: job.index,
            demo_mode,
            title: job.title.clone(),
            description: job.description.clone(),
            error: None,
            message: message.to_string(),
            generation_params: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_default_when_absent() {
        let opts: GenerationOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(opts.scene_style, SceneStyle::Professional);
        assert_eq!(opts.generation_speed, GenerationSpeed::Normal);
        assert_eq!(opts.image_quality, ImageQuality::Standard);
        assert_eq!(opts.product_description(), "");
    }

    #[test]
    fn options_parse_camel_case_and_unknown_values() {
        let opts: GenerationOptions = serde_json::from_value(json!({
            "sceneStyle": "creative",
            "generationSpeed": "turbo",
            "imageQuality": "4k",
            "productDescription": "a lamp"
        }))
        .unwrap();
        assert_eq!(opts.scene_style, SceneStyle::Creative);
        assert_eq!(opts.generation_speed, GenerationSpeed::Normal);
        assert_eq!(opts.image_quality, ImageQuality::High);
        assert_eq!(opts.product_description(), "a lamp");
    }

    #[test]
    fn quality_and_speed_map_to_request_parameters() {
        assert_eq!(ImageQuality::from_key("1K").size(), "1K");
        assert_eq!(ImageQuality::from_key("8K").size(), "2K");
        assert!(GenerationSpeed::Quality.sequential_generation());
        assert!(!GenerationSpeed::Fast.sequential_generation());
        assert_eq!(serde_json::to_value(ImageQuality::High).unwrap(), "4K");
    }

    #[test]
    fn result_serializes_camel_case_without_empty_fields() {
        let job = PromptJob::new("p", 3);
        let v = serde_json::to_value(GenerationResult::for_job(&job, "u".into(), true, "m")).unwrap();
        assert_eq!(
            v,
            json!({
                "success": true,
                "imageUrl": "u",
                "prompt": "p",
                "index": 3,
                "demoMode": true,
                "message": "m"
            })
        );
    }
}
