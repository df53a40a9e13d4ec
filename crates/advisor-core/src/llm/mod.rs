mod gemini;
mod settings;

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::prompt::PromptKind;

pub use gemini::GeminiClient;
pub use settings::LlmSettings;

/// Client abstraction for dispatching analysis prompts to a generative
/// model backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Render the template for `kind` around the document text and return
    /// the model's raw reply. Exactly one attempt is made per call; callers
    /// wanting retries wrap the client themselves.
    async fn dispatch(
        &self,
        kind: PromptKind,
        document_text: &str,
    ) -> Result<String, DispatchError>;
}

/// Offline stand-in that answers every prompt kind with canned text shaped
/// like real model output, so the pipeline works without a backend.
#[derive(Debug, Default, Clone)]
pub struct NoopClient;

#[async_trait]
impl LlmClient for NoopClient {
    async fn dispatch(
        &self,
        kind: PromptKind,
        _document_text: &str,
    ) -> Result<String, DispatchError> {
        let canned = match kind {
            PromptKind::Overview => {
                "No model backend is configured, so this overview is a placeholder.".to_string()
            }
            PromptKind::Uml => {
                "Class Diagram\n```mermaid\nclassDiagram\n    class Pending\n```".to_string()
            }
            other => format!(
                "1. No {} items were derived because no model backend is configured.",
                other.name()
            ),
        };
        Ok(canned)
    }
}
