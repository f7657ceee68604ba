//! Single-job generation against the external API, with demo substitution.
//!
//! `Generator::generate` never fails: transport and API errors are folded into
//! a `GenerationResult` with `success = false` and a fallback image.
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;
use crate::generation::models::{GenerationOptions, GenerationParams, GenerationResult, GenerationSpeed, PromptJob};
use crate::seedream::{ApiMode, ImageGenerationRequest, SeedreamClient};
use crate::utils::image_data::{encode_data_url, inline_mime, is_inline_image};

const PREVIEW_CHARS: usize = 50;

/// Artificial delay used in demo mode, per generation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub fast: Duration,
    pub normal: Duration,
    pub quality: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        SimulatedLatency {
            fast: Duration::from_millis(800),
            normal: Duration::from_millis(1500),
            quality: Duration::from_millis(2500),
        }
    }
}

impl SimulatedLatency {
    pub fn none() -> Self {
        SimulatedLatency { fast: Duration::ZERO, normal: Duration::ZERO, quality: Duration::ZERO }
    }

    pub fn for_speed(&self, speed: GenerationSpeed) -> Duration {
        match speed {
            GenerationSpeed::Fast => self.fast,
            GenerationSpeed::Normal => self.normal,
            GenerationSpeed::Quality => self.quality,
        }
    }
}

pub struct Generator {
    client: SeedreamClient,
    mode: ApiMode,
    demo_images: Vec<String>,
    latency: SimulatedLatency,
    inline_results: bool,
}

impl Generator {
    pub fn new(client: SeedreamClient, mode: ApiMode, demo_images: Vec<String>) -> Self {
        Generator {
            client,
            mode,
            demo_images,
            latency: SimulatedLatency::default(),
            inline_results: true,
        }
    }

    pub fn from_config(config: &Config, client: SeedreamClient, mode: ApiMode) -> Self {
        Generator::new(client, mode, config.demo_images.clone()).with_inline_results(config.inline_results)
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_inline_results(mut self, enabled: bool) -> Self {
        self.inline_results = enabled;
        self
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    /// Demo image registered at `index`, else a placeholder keyed on it.
    pub fn fallback_image_url(&self, index: usize) -> String {
        self.demo_images
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("https://picsum.photos/1920/1080?random={}&blur=1", index + 10))
    }

    /// Generate one image for `job`.
    ///
    /// `base_image` switches to image-to-image when it holds inline image data.
    pub async fn generate(
        &self,
        job: &PromptJob,
        options: &GenerationOptions,
        base_image: Option<&str>,
    ) -> GenerationResult {
        tracing::info!("Generating image {}: {}...", job.index + 1, preview(&job.text));

        if !self.mode.is_production() {
            return self.generate_demo(job, options).await;
        }

        match self.generate_remote(job, options, base_image).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Generation {} failed: {}", job.index + 1, e);
                let mut result = GenerationResult::for_job(
                    job,
                    self.fallback_image_url(job.index),
                    true,
                    "Generation failed, demo image substituted",
                );
                result.success = false;
                result.error = Some(e.to_string());
                result
            }
        }
    }

    /// Convenience wrapper taking the prompt text and index directly.
    pub async fn generate_prompt(
        &self,
        prompt: &str,
        index: usize,
        options: &GenerationOptions,
        base_image: Option<&str>,
    ) -> GenerationResult {
        self.generate(&PromptJob::new(prompt, index), options, base_image).await
    }

    async fn generate_demo(&self, job: &PromptJob, options: &GenerationOptions) -> GenerationResult {
        tracing::debug!(?options, "Demo mode, substituting stock image");
        let delay = self.latency.for_speed(options.generation_speed);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        GenerationResult::for_job(job, self.fallback_image_url(job.index), true, "Demo image generated")
    }

    async fn generate_remote(
        &self,
        job: &PromptJob,
        options: &GenerationOptions,
        base_image: Option<&str>,
    ) -> AppResult<GenerationResult> {
        let image = match base_image {
            Some(img) if is_inline_image(img) => Some(img.to_string()),
            Some(_) => {
                tracing::debug!("Base image is not inline data, generating from prompt only");
                None
            }
            None => None,
        };
        let request = ImageGenerationRequest::new(self.client.model(), job.text.as_str())
            .with_size(options.image_quality.size())
            .with_sequential(options.generation_speed.sequential_generation())
            .with_image(image);
        let params = GenerationParams {
            size: request.size.clone(),
            sequential_generation: request.sequential_image_generation.clone(),
        };

        let response = self.client.generate_images(&request).await?;

        let mut result = match response.first_url() {
            Some(url) => {
                tracing::info!("Image {} generated", job.index + 1);
                let mut result = GenerationResult::for_job(job, url.to_string(), false, "Image generated with Seedream API");
                if self.inline_results {
                    result.image_base64 = self.inline_copy(url).await;
                }
                result
            }
            None => {
                tracing::warn!("Response for image {} carried no URL, using placeholder", job.index + 1);
                GenerationResult::for_job(
                    job,
                    format!("https://via.placeholder.com/1920x1080/00FF00/FFFFFF?text=Seedream+{}", job.index + 1),
                    false,
                    "Image generated with Seedream API (no URL returned, placeholder used)",
                )
            }
        };
        result.generation_params = Some(params);
        Ok(result)
    }

    /// Download the produced image as a data URL; `None` on any failure.
    async fn inline_copy(&self, url: &str) -> Option<String> {
        match self.client.fetch_image(url).await {
            Ok((bytes, content_type)) => Some(encode_data_url(&bytes, inline_mime(content_type.as_deref()))),
            Err(e) => {
                tracing::warn!("Could not inline image {}: {}", url, e);
                None
            }
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> SeedreamClient {
        SeedreamClient::new(base_url, "test-key", "seedream-test", Duration::from_secs(2)).unwrap()
    }

    fn demo_generator(demo_images: Vec<String>) -> Generator {
        Generator::new(client("http://127.0.0.1:1"), ApiMode::Demo, demo_images)
            .with_latency(SimulatedLatency::none())
    }

    #[tokio::test]
    async fn demo_mode_uses_placeholder_without_registered_image() {
        let gen = demo_generator(vec![]);
        let result = gen.generate_prompt("a red chair", 0, &GenerationOptions::default(), None).await;
        assert!(result.success);
        assert!(result.demo_mode);
        assert!(result.image_url.contains("random=10"));
        assert_eq!(result.prompt, "a red chair");
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn demo_mode_prefers_registered_image() {
        let gen = demo_generator(vec!["https://img.test/0.jpg".into(), "https://img.test/1.jpg".into()]);
        let opts = GenerationOptions::default();
        assert_eq!(gen.generate_prompt("p", 1, &opts, None).await.image_url, "https://img.test/1.jpg");
        assert!(gen.generate_prompt("p", 2, &opts, None).await.image_url.contains("random=12"));
    }

    #[tokio::test]
    async fn demo_mode_keeps_job_metadata() {
        let gen = demo_generator(vec![]);
        let job = PromptJob::new("Sunset - A warm orange sky", 0).with_details("Sunset", "A warm orange sky");
        let result = gen.generate(&job, &GenerationOptions::default(), None).await;
        assert_eq!(result.title.as_deref(), Some("Sunset"));
        assert_eq!(result.description.as_deref(), Some("A warm orange sky"));
        assert!(result.generation_params.is_none());
    }

    #[tokio::test]
    async fn network_failure_in_production_falls_back() {
        let gen = Generator::new(client("http://127.0.0.1:1"), ApiMode::Production, vec![])
            .with_latency(SimulatedLatency::none());
        let result = gen.generate_prompt("p", 0, &GenerationOptions::default(), None).await;
        assert!(!result.success);
        assert!(result.demo_mode);
        assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
        assert_eq!(result.image_url, gen.fallback_image_url(0));
    }

    #[test]
    fn latency_follows_speed() {
        let l = SimulatedLatency::default();
        assert_eq!(l.for_speed(GenerationSpeed::Fast), Duration::from_millis(800));
        assert_eq!(l.for_speed(GenerationSpeed::Normal), Duration::from_millis(1500));
        assert_eq!(l.for_speed(GenerationSpeed::Quality), Duration::from_millis(2500));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(80);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
    }

    #[tokio::test(start_paused = true)]
    async fn demo_latency_grows_with_speed() {
        let gen = Generator::new(client("http://127.0.0.1:1"), ApiMode::Demo, vec![]);
        for (speed, expected_ms) in [
            (GenerationSpeed::Fast, 800),
            (GenerationSpeed::Normal, 1500),
            (GenerationSpeed::Quality, 2500),
        ] {
            let options = GenerationOptions { generation_speed: speed, ..Default::default() };
            let start = tokio::time::Instant::now();
            let result = gen.generate_prompt("p", 0, &options, None).await;
            assert!(result.demo_mode);
            let elapsed = start.elapsed();
            let expected = Duration::from_millis(expected_ms);
            assert!(
                elapsed >= expected && elapsed < expected + Duration::from_millis(10),
                "{:?} took {:?}",
                speed,
                elapsed
            );
        }
    }
}
