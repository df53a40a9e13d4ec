use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LlmClient, LlmSettings};
use crate::error::DispatchError;
use crate::prompt::PromptKind;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Client for the Gemini `generateContent` endpoint. One HTTP POST per
/// prompt kind, no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            bail!("Gemini API key must be provided via ADVISOR_API_KEY");
        }
        let base = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = settings
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base.trim_end_matches('/'),
            model
        );
        let http = Client::builder()
            .user_agent("project-advisor/0.3")
            .timeout(Duration::from_secs(
                settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .context("failed to build Gemini HTTP client")?;
        Ok(Self {
            http,
            url,
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn dispatch(
        &self,
        kind: PromptKind,
        document_text: &str,
    ) -> Result<String, DispatchError> {
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: kind.render(document_text),
                }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Http { status, body });
        }

        let message: GenerateResponse =
            response
                .json()
                .await
                .map_err(|err| DispatchError::Malformed {
                    reason: err.to_string(),
                })?;
        let candidate = message
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DispatchError::Malformed {
                reason: "candidates list is empty".to_string(),
            })?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        debug!(kind = kind.name(), chars = text.len(), "dispatch completed");
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn settings(url: String) -> LlmSettings {
        LlmSettings {
            provider: "gemini".into(),
            api_key: "test-key".into(),
            endpoint: Some(url),
            model: Some("gemini-test".into()),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn constructor_rejects_blank_api_key() {
        let mut bad = settings("http://localhost:9".into());
        bad.api_key = "  ".into();
        let err = GeminiClient::new(&bad).unwrap_err();
        assert!(err.to_string().contains("ADVISOR_API_KEY"));
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn dispatch_concatenates_candidate_parts() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-test:generateContent")
                .query_param("key", "test-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "candidates": [
                        {
                            "content": {
                                "parts": [
                                    {"text": "1. Alpha\n"},
                                    {"text": "2. Beta"}
                                ]
                            }
                        }
                    ]
                }));
        });

        let client = GeminiClient::new(&settings(server.base_url())).unwrap();
        let text = client
            .dispatch(PromptKind::FunctionalRequirements, "document body")
            .await
            .unwrap();
        assert_eq!(text, "1. Alpha\n2. Beta");
        mock.assert();
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn http_failure_is_a_single_attempt() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-test:generateContent");
            then.status(500).body("upstream exploded");
        });

        let client = GeminiClient::new(&settings(server.base_url())).unwrap();
        let err = client
            .dispatch(PromptKind::Overview, "document body")
            .await
            .unwrap_err();
        match err {
            DispatchError::Http { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected http error, got {other:?}"),
        }
        mock.assert_hits(1);
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn empty_candidates_list_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-test:generateContent");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "candidates": [] }));
        });

        let client = GeminiClient::new(&settings(server.base_url())).unwrap();
        let err = client
            .dispatch(PromptKind::Overview, "document body")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Malformed { .. }));
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn request_body_matches_wire_contract() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-test:generateContent")
                .json_body_partial(
                    json!({
                        "contents": [
                            {"parts": [{"text": PromptKind::Uml.render("document body")}]}
                        ]
                    })
                    .to_string(),
                );
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "Class Diagram"}]}}
                    ]
                }));
        });

        let client = GeminiClient::new(&settings(server.base_url())).unwrap();
        let text = client
            .dispatch(PromptKind::Uml, "document body")
            .await
            .unwrap();
        assert_eq!(text, "Class Diagram");
        mock.assert();
    }
}
