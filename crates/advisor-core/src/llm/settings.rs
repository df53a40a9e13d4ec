use anyhow::{Context, Result};
use std::collections::HashMap;

/// Environment-driven configuration handed into client constructors; the
/// process never reads the key from ambient global state after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub provider: String,
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl LlmSettings {
    const PROVIDER_ENV: &'static str = "ADVISOR_PROVIDER";
    const API_KEY_ENV: &'static str = "ADVISOR_API_KEY";
    const ENDPOINT_ENV: &'static str = "ADVISOR_ENDPOINT";
    const MODEL_ENV: &'static str = "ADVISOR_MODEL";
    const TIMEOUT_ENV: &'static str = "ADVISOR_TIMEOUT_SECS";

    /// Load settings from environment variables.
    ///
    /// * `ADVISOR_PROVIDER` — `gemini` (default) or `noop`.
    /// * `ADVISOR_API_KEY`  — API key (required unless provider is `noop`).
    /// * `ADVISOR_ENDPOINT` — Optional custom base URL.
    /// * `ADVISOR_MODEL`    — Optional model override.
    /// * `ADVISOR_TIMEOUT_SECS` — Optional per-dispatch timeout.
    pub fn from_env() -> Result<Self> {
        Self::from_map(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        let provider = vars
            .get(Self::PROVIDER_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "gemini".to_string())
            .trim()
            .to_lowercase();
        let api_key = match provider.as_str() {
            "noop" => vars.get(Self::API_KEY_ENV).cloned().unwrap_or_default(),
            _ => vars
                .get(Self::API_KEY_ENV)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .with_context(|| {
                    format!("environment variable {} must be set", Self::API_KEY_ENV)
                })?,
        };
        let endpoint = vars
            .get(Self::ENDPOINT_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty());
        let model = vars
            .get(Self::MODEL_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty());
        let timeout_secs = vars
            .get(Self::TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(Self {
            provider,
            api_key,
            endpoint,
            model,
            timeout_secs,
        })
    }
}
