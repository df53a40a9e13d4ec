use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::dedup::deduplicate;
use crate::error::{AdvisorError, DispatchError};
use crate::input::validate_document_text;
use crate::llm::LlmClient;
use crate::parse::{parse_diagram_blocks, parse_list, parse_paragraphs};
use crate::prompt::{verify_templates, PromptKind, TemplateValidationError};

pub const REQUIREMENT_CATEGORIES: [&str; 4] =
    ["business", "functional", "non_functional", "technical"];
pub const ANALYSIS_CATEGORIES: [&str; 3] = ["functional", "technical", "impact"];

/// Structured outcome of one full document analysis. Assembled once and
/// immutable afterwards; persisted only through the rendered report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// At most two overview paragraphs, in order.
    pub overview: Vec<String>,
    /// Requirement lists keyed by the four fixed categories.
    pub requirements: BTreeMap<String, Vec<String>>,
    /// Analysis lists keyed by the three fixed categories.
    pub analysis: BTreeMap<String, Vec<String>>,
    /// Recognized diagram blocks joined by blank lines, encounter order.
    pub uml: String,
}

/// Orchestrates the nine prompt dispatches for a document and assembles
/// their parsed responses.
pub struct Advisor<C: LlmClient> {
    client: Arc<C>,
}

impl<C: LlmClient> Advisor<C> {
    /// Validates the prompt table before accepting the client, so a broken
    /// template is caught at startup rather than mid-analysis.
    pub fn new(client: Arc<C>) -> Result<Self, TemplateValidationError> {
        verify_templates()?;
        Ok(Self { client })
    }

    /// Dispatch all nine prompt kinds concurrently and assemble the result
    /// indexed by kind, so assembly order is stable regardless of
    /// completion order. The first dispatch failure aborts the whole
    /// analysis; no partial result is produced.
    #[instrument(
        name = "analyze_document",
        skip(self, document_text),
        fields(document_chars = document_text.len())
    )]
    pub async fn analyze(&self, document_text: &str) -> Result<AnalysisResult, DispatchError> {
        let (
            overview,
            business,
            functional,
            non_functional,
            technical,
            functional_analysis,
            technical_analysis,
            impact_analysis,
            uml,
        ) = tokio::try_join!(
            self.client.dispatch(PromptKind::Overview, document_text),
            self.client
                .dispatch(PromptKind::BusinessRequirements, document_text),
            self.client
                .dispatch(PromptKind::FunctionalRequirements, document_text),
            self.client
                .dispatch(PromptKind::NonFunctionalRequirements, document_text),
            self.client
                .dispatch(PromptKind::TechnicalRequirements, document_text),
            self.client
                .dispatch(PromptKind::FunctionalAnalysis, document_text),
            self.client
                .dispatch(PromptKind::TechnicalAnalysis, document_text),
            self.client
                .dispatch(PromptKind::ImpactAnalysis, document_text),
            self.client.dispatch(PromptKind::Uml, document_text),
        )?;

        let requirements = BTreeMap::from([
            ("business".to_string(), parse_list(&business)),
            ("functional".to_string(), parse_list(&functional)),
            ("non_functional".to_string(), parse_list(&non_functional)),
            ("technical".to_string(), parse_list(&technical)),
        ]);
        let analysis = BTreeMap::from([
            ("functional".to_string(), parse_list(&functional_analysis)),
            ("technical".to_string(), parse_list(&technical_analysis)),
            ("impact".to_string(), parse_list(&impact_analysis)),
        ]);

        let result = AnalysisResult {
            overview: parse_paragraphs(&overview),
            requirements,
            analysis,
            uml: parse_diagram_blocks(&uml),
        };
        debug!(
            overview_paragraphs = result.overview.len(),
            requirement_items = result.requirements.values().map(Vec::len).sum::<usize>(),
            analysis_items = result.analysis.values().map(Vec::len).sum::<usize>(),
            uml_chars = result.uml.len(),
            "analysis assembled"
        );
        Ok(result)
    }
}

/// Full pipeline behind the upload boundary: gate the extracted text, run
/// the analysis, then collapse near-duplicate requirements. Only the
/// requirement lists are deduplicated; analysis lists are emitted as
/// parsed.
pub async fn run_analysis<C: LlmClient>(
    advisor: &Advisor<C>,
    document_text: &str,
) -> Result<AnalysisResult, AdvisorError> {
    validate_document_text(document_text)?;
    let mut result = advisor.analyze(document_text).await?;
    result.requirements = deduplicate(&result.requirements);
    Ok(result)
}
