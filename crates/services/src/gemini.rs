//! Wire types for the `generateContent` endpoint shared by content and speech calls.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;

pub(crate) fn generate_request(
    client: &Client,
    config: &GeminiConfig,
    model: &str,
    body: &GenerateRequest,
) -> RequestBuilder {
    client
        .post(config.generate_url(model))
        .header("x-goog-api-key", &config.api_key)
        .json(body)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: Value,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>, generation_config: Value) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_part(&self) -> Option<&ResponsePart> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
    }

    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.first_part()
            .and_then(|part| part.text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// Base64 payload of the first inline data part.
    pub fn first_inline_data(&self) -> Option<&str> {
        self.first_part()
            .and_then(|part| part.inline_data.as_ref())
            .map(|data| data.data.as_str())
            .filter(|data| !data.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InlineData {
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_text_and_inline_data() {
        let body = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":1}" }] }
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("{\"a\":1}"));
        assert_eq!(response.first_inline_data(), None);

        let body = r#"{
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "audio/pcm", "data": "AAA=" } }] }
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_inline_data(), Some("AAA="));
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateRequest::text("hi", serde_json::json!({ "temperature": 0.2 }));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["temperature"], 0.2);
    }
}
