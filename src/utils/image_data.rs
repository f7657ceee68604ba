//! Inline image (`data:image/...;base64,`) helpers.
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AppError, AppResult};

const INLINE_PREFIX: &str = "data:image/";
const FALLBACK_MIME: &str = "image/jpeg";

pub fn is_inline_image(value: &str) -> bool {
    value.starts_with(INLINE_PREFIX)
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a data URL into its MIME type and decoded bytes.
pub fn decode_data_url(value: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| AppError::ImageData("missing data: scheme".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::ImageData("missing ',' separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::ImageData("only base64 payloads are supported".into()))?;
    if !mime.starts_with("image/") {
        return Err(AppError::ImageData(format!("unsupported media type '{}'", mime)));
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::ImageData(e.to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::ImageData("empty image payload".into()));
    }
    Ok((mime.to_string(), bytes))
}

/// MIME type for an inline copy of a downloaded image: the reported type when
/// it is an image type, JPEG otherwise.
pub fn inline_mime(content_type: Option<&str>) -> &str {
    content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or(FALLBACK_MIME)
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

/// Read an image file into a data URL.
pub async fn load_data_url(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_data_url(&bytes, mime_from_path(path)))
}
