//! Axum request handlers for the HTTP API.
//!
//! Handlers validate input and delegate to the generator or batch runner;
//! they hold no generation logic of their own.
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::extract::ApiJson;
use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::generation::{BatchOutcome, GenerationOptions, GenerationResult, PromptJob};
use crate::prompt::{parse_jobs, product_scene_jobs, ParseMode};
use crate::utils::image_data::{decode_data_url, is_inline_image};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRequest {
    pub prompt: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleRequest {
    #[serde(alias = "prompts")]
    pub prompts_text: Option<String>,
    #[serde(default)]
    pub mode: ParseMode,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductScenesRequest {
    pub image: Option<String>,
    pub custom_prompt: Option<String>,
    pub scene_count: Option<usize>,
    #[serde(default)]
    pub options: GenerationOptions,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mode = state.generator().mode();
    let message = if mode.is_production() {
        "Seedream API active"
    } else {
        "Demo mode, stock images"
    };
    Json(json!({
        "success": true,
        "apiValid": mode.is_production(),
        "mode": mode,
        "message": message,
    }))
}

pub async fn prompts(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "prompts": state.series_prompts,
        "apiStatus": state.generator().mode(),
    }))
}

pub async fn generate_single(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SingleRequest>,
) -> AppResult<Json<GenerationResult>> {
    let prompt = required(payload.prompt.as_deref(), "Prompt is required")?;
    let image = optional_image(payload.image.as_deref())?;
    let result = state.generator().generate_prompt(prompt, 0, &payload.options, image).await;
    Ok(Json(result))
}

pub async fn generate_series(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<SeriesRequest>>,
) -> Json<BatchOutcome> {
    let options = payload.map(|Json(p)| p.options).unwrap_or_default();
    tracing::info!("Generating configured series");
    let jobs = PromptJob::from_texts(state.series_prompts.iter().cloned());
    Json(state.batches.run(&jobs, &options, None).await)
}

pub async fn generate_multiple(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MultipleRequest>,
) -> AppResult<Json<BatchOutcome>> {
    let text = required(payload.prompts_text.as_deref(), "Prompt text is required")?;
    let jobs = parse_jobs(text, payload.mode);
    tracing::info!("{} prompts detected ({:?} mode)", jobs.len(), payload.mode);
    Ok(Json(state.batches.run(&jobs, &payload.options, None).await))
}

pub async fn generate_product_scenes(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ProductScenesRequest>,
) -> AppResult<Json<BatchOutcome>> {
    let image = required(payload.image.as_deref(), "No image provided")?;
    let image = optional_image(Some(image))?;
    let options = &payload.options;

    let jobs = product_scene_jobs(
        payload.custom_prompt.as_deref(),
        options.scene_style,
        options.product_description(),
        payload.scene_count,
    );
    tracing::info!("{} product scenes requested (style '{}')", jobs.len(), options.scene_style);

    Ok(Json(state.batches.run(&jobs, options, image).await))
}

fn required<'a>(value: Option<&'a str>, message: &str) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::InvalidInput(message.to_string())),
    }
}

/// Inline images must decode; anything else is passed through untouched.
fn optional_image(image: Option<&str>) -> AppResult<Option<&str>> {
    match image.map(str::trim).filter(|img| !img.is_empty()) {
        Some(img) if is_inline_image(img) => {
            decode_data_url(img)?;
            Ok(Some(img))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(matches!(required(None, "x"), Err(AppError::InvalidInput(_))));
        assert!(matches!(required(Some("  "), "x"), Err(AppError::InvalidInput(_))));
        assert_eq!(required(Some(" hi "), "x").unwrap(), "hi");
    }

    #[test]
    fn inline_images_are_validated() {
        assert!(optional_image(Some("data:image/png;base64,!!")).is_err());
        assert_eq!(optional_image(Some("data:image/png;base64,AAAA")).unwrap(), Some("data:image/png;base64,AAAA"));
        assert_eq!(optional_image(Some("https://cdn.test/a.png")).unwrap(), Some("https://cdn.test/a.png"));
        assert_eq!(optional_image(Some("")).unwrap(), None);
    }

    #[test]
    fn multiple_request_accepts_both_field_names() {
        let a: MultipleRequest = serde_json::from_value(json!({"promptsText": "x"})).unwrap();
        let b: MultipleRequest = serde_json::from_value(json!({"prompts": "y", "mode": "sectioned"})).unwrap();
        assert_eq!(a.prompts_text.as_deref(), Some("x"));
        assert_eq!(a.mode, ParseMode::Flat);
        assert_eq!(b.prompts_text.as_deref(), Some("y"));
        assert_eq!(b.mode, ParseMode::Sectioned);
    }
}
