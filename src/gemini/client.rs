//! Thin HTTP client for the Gemini generateContent endpoints.
//!
//! - `generate_image` posts prompt (and optional reference image) to the
//!   image model and returns the first inline image as a data URL.
//! - `enhance_prompt` posts a rewrite instruction to the text model and
//!   falls back to the original text on any failure.
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Instructional wrapper for the prompt rewrite. The model is told to keep
/// the input's language and to answer with the rewritten prompt only.
const ENHANCE_INSTRUCTION: &str = "Act as an expert prompt engineer for AI image generation.\n\
Improve the following description provided by the user so it is more detailed, visual and artistic.\n\
Keep the original language of the description.\n\
Do not add explanations, return only the improved prompt.";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    image_model: String,
    text_model: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: Option<String>, image_model: String, text_model: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        GeminiClient { client: Client::new(), base_url: base, api_key, image_model, text_model }
    }

    pub fn from_config(config: &Config) -> Self {
        GeminiClient::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            config.image_model.clone(),
            config.text_model.clone(),
        )
    }

    /// Generate (or edit, when `reference_image` is given) a single image.
    ///
    /// `final_prompt` is sent as-is; `aspect_ratio_value` is passed through
    /// untransformed as generation configuration. One attempt, no retries.
    /// Returns the image as a `data:image/png;base64,...` URL.
    pub async fn generate_image(
        &self,
        final_prompt: &str,
        reference_image: Option<&str>,
        aspect_ratio_value: &str,
    ) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingCredential)?;

        // Part order is part of the contract: reference image first, then text.
        let mut parts: Vec<Value> = Vec::new();
        if let Some(data_url) = reference_image {
            let (mime_type, payload) = split_data_url(data_url);
            parts.push(json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": payload,
                }
            }));
        }
        parts.push(json!({"text": final_prompt}));

        let body = json!({
            "contents": [{"parts": parts}],
            "generationConfig": {
                "imageConfig": {
                    "aspectRatio": aspect_ratio_value,
                }
            }
        });

        tracing::info!("Requesting image from model {}", self.image_model);
        tracing::debug!("Final prompt: {}", final_prompt);

        let response = self.post_generate_content(&self.image_model, api_key, &body).await?;
        extract_image_data_url(&response)
    }

    /// Rewrite a draft description into a more detailed one. Best-effort:
    /// any failure (missing key, transport, upstream, blank answer) returns
    /// the original text unchanged.
    pub async fn enhance_prompt(&self, original: &str) -> String {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                tracing::warn!("Skipping prompt enhancement: GEMINI_API_KEY is not set");
                return original.to_string();
            }
        };

        let body = json!({
            "contents": [{"parts": [{
                "text": format!("{}\n\nOriginal description: \"{}\"", ENHANCE_INSTRUCTION, original),
            }]}]
        });

        match self.post_generate_content(&self.text_model, api_key, &body).await {
            Ok(response) => match extract_text(&response) {
                Some(text) if !text.trim().is_empty() => text.trim().to_string(),
                _ => original.to_string(),
            },
            Err(e) => {
                tracing::warn!("Prompt enhancement failed, keeping original text: {}", e);
                original.to_string()
            }
        }
    }

    /// POST a generateContent body to `model` and return the JSON response.
    async fn post_generate_content(&self, model: &str, api_key: &str, body: &Value) -> AppResult<Value> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self.client.post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            response.json().await.map_err(AppError::HttpClient)
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("Status: {}, Body: {}", status, error_body);
            tracing::error!("Gemini request to {} failed. {}", model, error_message);
            Err(AppError::Gemini(error_message))
        }
    }
}

/// Decompose a data-URL image into (mime type, raw base64 payload).
///
/// Input without a `data:image/...;base64,` prefix is returned unchanged as
/// the payload, with `image/png` assumed.
pub fn split_data_url(data: &str) -> (String, String) {
    if let Some(rest) = data.strip_prefix("data:") {
        if let Some((mime_type, payload)) = rest.split_once(";base64,") {
            if mime_type.starts_with("image/") {
                return (mime_type.to_string(), payload.to_string());
            }
        }
    }
    ("image/png".to_string(), data.to_string())
}

/// Locate the image payload in a generateContent response.
///
/// Only `candidates[0]` is consulted. Its parts are scanned in order and the
/// first part carrying inline data wins; any text parts alongside an image
/// are ignored. With no image, a text part becomes the failure reason.
pub(crate) fn extract_image_data_url(response: &Value) -> AppResult<String> {
    let candidates = match response.get("candidates").and_then(|v| v.as_array()) {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => return Err(AppError::NoCandidates),
    };

    let parts = match candidates[0]
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        Some(parts) => parts,
        None => return Err(AppError::EmptyResponse),
    };

    for part in parts {
        if let Some(data) = part
            .get("inlineData")
            .and_then(|d| d.get("data"))
            .and_then(|d| d.as_str())
        {
            return Ok(format!("data:image/png;base64,{}", data));
        }
    }

    if let Some(text) = parts.iter().find_map(|p| p.get("text").and_then(|t| t.as_str())) {
        return Err(AppError::TextOnlyResponse(text.to_string()));
    }
    Err(AppError::EmptyResponse)
}

/// First text part of `candidates[0]`, if any.
pub(crate) fn extract_text(response: &Value) -> Option<String> {
    response
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .and_then(|parts| parts.iter().find_map(|p| p.get("text").and_then(|t| t.as_str())))
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_without_key() -> GeminiClient {
        GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            None,
            "image-model".to_string(),
            "text-model".to_string(),
        )
    }

    fn client_with_unreachable_backend() -> GeminiClient {
        // Port 9 (discard) is not listening; connection is refused locally.
        GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            Some("test-key".to_string()),
            "image-model".to_string(),
            "text-model".to_string(),
        )
    }

    #[test]
    fn test_split_data_url_with_prefix() {
        let (mime_type, payload) = split_data_url("data:image/webp;base64,AAA=");
        assert_eq!(mime_type, "image/webp");
        assert_eq!(payload, "AAA=");
    }

    #[test]
    fn test_split_data_url_without_prefix_defaults_to_png() {
        let (mime_type, payload) = split_data_url("iVBORw0KGgo=");
        assert_eq!(mime_type, "image/png");
        assert_eq!(payload, "iVBORw0KGgo=");
    }

    #[test]
    fn test_extract_image_no_candidates() {
        let response = serde_json::json!({"candidates": []});
        assert!(matches!(extract_image_data_url(&response), Err(AppError::NoCandidates)));
        let response = serde_json::json!({});
        assert!(matches!(extract_image_data_url(&response), Err(AppError::NoCandidates)));
    }

    #[test]
    fn test_extract_image_text_only_response_carries_reason() {
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "blocked"}]}}]
        });
        match extract_image_data_url(&response) {
            Err(AppError::TextOnlyResponse(reason)) => assert!(reason.contains("blocked")),
            other => panic!("expected TextOnlyResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_image_first_inline_part_wins() {
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"inlineData": {"mimeType": "image/png", "data": "BBBB"}},
            ]}}]
        });
        assert_eq!(extract_image_data_url(&response).unwrap(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_extract_image_ignores_text_next_to_image() {
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"text": "here is your image"},
                {"inlineData": {"mimeType": "image/png", "data": "CCCC"}},
            ]}}]
        });
        assert_eq!(extract_image_data_url(&response).unwrap(), "data:image/png;base64,CCCC");
    }

    #[test]
    fn test_extract_image_empty_response() {
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": []}}]
        });
        assert!(matches!(extract_image_data_url(&response), Err(AppError::EmptyResponse)));
        let response = serde_json::json!({"candidates": [{}]});
        assert!(matches!(extract_image_data_url(&response), Err(AppError::EmptyResponse)));
    }

    #[test]
    fn test_extract_image_only_first_candidate_consulted() {
        let response = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "nope"}]}},
                {"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "DDDD"}}]}},
            ]
        });
        assert!(matches!(extract_image_data_url(&response), Err(AppError::TextOnlyResponse(_))));
    }

    #[test]
    fn test_extract_text_first_part() {
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "  a detailed cat  "}]}}]
        });
        assert_eq!(extract_text(&response).as_deref(), Some("  a detailed cat  "));
        assert_eq!(extract_text(&serde_json::json!({})), None);
    }

    #[tokio::test]
    async fn test_generate_image_fails_fast_without_credential() {
        let client = client_without_key();
        let result = client.generate_image("a cat", None, "1:1").await;
        assert!(matches!(result, Err(AppError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_enhance_returns_original_without_credential() {
        let client = client_without_key();
        assert_eq!(client.enhance_prompt("a cat").await, "a cat");
    }

    #[tokio::test]
    async fn test_enhance_returns_original_on_transport_failure() {
        let client = client_with_unreachable_backend();
        assert_eq!(client.enhance_prompt("a cat").await, "a cat");
    }

    #[tokio::test]
    async fn test_generate_propagates_transport_failure() {
        let client = client_with_unreachable_backend();
        let result = client.generate_image("a cat", None, "1:1").await;
        assert!(matches!(result, Err(AppError::HttpClient(_))));
    }
}
