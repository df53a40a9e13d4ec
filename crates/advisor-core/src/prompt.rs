use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder each template carries for the document text.
pub const INPUT_SLOT: &str = "{input}";

const OVERVIEW: &str = concat!(
    "You are an AI advisor. Provide a concise project overview in English based on the uploaded document: {input}. ",
    "Return 1-2 short paragraphs, no explanations, instructions, or Markdown formatting."
);

const BUSINESS_REQUIREMENTS: &str = concat!(
    "You are an AI advisor. Identify business requirements (goals, objectives, business rules) in English based on the uploaded document: {input}. ",
    "Return a numbered list of concise requirements as full sentences using 'must' or 'shall' where appropriate, with priority (High/Medium/Low) and dependencies (e.g., 'Dependency: Functional 1'), no labels like 'Requirement:' or Markdown."
);

const FUNCTIONAL_REQUIREMENTS: &str = concat!(
    "You are an AI advisor. Identify functional requirements (specific features and functionalities) in English based on the uploaded document: {input}. ",
    "Return a numbered list of concise requirements as full sentences using 'must' or 'shall' where appropriate, with priority (High/Medium/Low) and dependencies, no labels like 'Requirement:' or Markdown."
);

const NON_FUNCTIONAL_REQUIREMENTS: &str = concat!(
    "You are an AI advisor. Identify non-functional requirements (performance, security, usability, etc.) in English based on the uploaded document: {input}. ",
    "Return a numbered list of concise requirements as full sentences using 'must' or 'shall' where appropriate, with priority (High/Medium/Low) and dependencies, no labels like 'Requirement:' or Markdown."
);

const TECHNICAL_REQUIREMENTS: &str = concat!(
    "You are an AI advisor. Identify technical requirements (technologies, frameworks, databases, deployment, etc.) in English based on the uploaded document: {input}. ",
    "Return a numbered list of concise requirements as full sentences using 'must' or 'shall' where appropriate, with priority (High/Medium/Low) and dependencies, no labels like 'Requirement:' or Markdown."
);

const FUNCTIONAL_ANALYSIS: &str = concat!(
    "You are an AI advisor. For each functional requirement in the uploaded document: {input}, provide a concise analysis including: ",
    "1. Feasibility (Feasible/Partially Feasible/Not Feasible), ",
    "2. Implementation Complexity (Low/Medium/High), ",
    "3. System Impact (Low/Medium/High), ",
    "4. Suggested Implementation Approach. ",
    "Return a numbered list, each item formatted as: '[Text]; Feasibility: [Value]; Complexity: [Value]; Impact: [Value]; Approach: [Text]', no additional explanations or Markdown."
);

const TECHNICAL_ANALYSIS: &str = concat!(
    "You are an AI advisor. For each requirement in the uploaded document: {input}, provide a concise technical analysis including: ",
    "1. Technical Constraints, ",
    "2. Architectural Implications, ",
    "3. Technology Stack Compatibility, ",
    "4. Performance Considerations. ",
    "Return a numbered list, each item formatted as: '[Text]; Constraints: [Text]; Architecture: [Text]; Compatibility: [Text]; Performance: [Text]', no additional explanations or Markdown."
);

const IMPACT_ANALYSIS: &str = concat!(
    "You are an AI advisor. Provide a concise impact analysis for the requirements in the uploaded document: {input}, including: ",
    "1. Cross-Requirement Impacts, ",
    "2. System-Wide Implications, ",
    "3. Business Process Impacts, ",
    "4. Integration Points with Existing Systems. ",
    "Return a numbered list with each item clearly addressing one of these points, no additional explanations or Markdown."
);

const UML: &str = concat!(
    "You are an AI advisor. Provide detailed UML diagrams in English based on the uploaded document: {input}. ",
    "Generate the following diagrams in valid Mermaid.js syntax (version 10.9.3, no extra characters or invalid syntax). ",
    "Clearly separate each diagram with the following explicit headings:\n",
    "1. 'Class Diagram': Define key classes with attributes, methods, and relationships (use --> for association, --|> for inheritance, *-- for composition), apply design patterns (e.g., Singleton).\n",
    "2. 'Use Case Diagram': Use 'graph TD' instead of 'flowchart'. Do NOT use the 'actor' keyword. Define actors and use cases using shapes like User([User]), UC1((UseCase1)), and connect with --> arrows.",
    "3. 'Activity Diagram': Clearly define the workflow, including start/end points, decision points, and parallel processes.\n",
    "4. 'Sequence Diagram': Define objects, interactions, messages, and sequence flows clearly.\n",
    "Do not use generic headings like 'Diagram X', instead use exactly the headings given above. ",
    "Return only these headings followed by Mermaid.js diagrams, no additional explanations or Markdown formatting.",
    "Ensure all Mermaid code is syntactically valid and renders without errors in Mermaid.js v10.9.3. Do not generate malformed diagrams."
);

/// The nine fixed instruction categories sent to the generative API per
/// analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Overview,
    BusinessRequirements,
    FunctionalRequirements,
    NonFunctionalRequirements,
    TechnicalRequirements,
    FunctionalAnalysis,
    TechnicalAnalysis,
    ImpactAnalysis,
    Uml,
}

impl PromptKind {
    pub const ALL: [PromptKind; 9] = [
        PromptKind::Overview,
        PromptKind::BusinessRequirements,
        PromptKind::FunctionalRequirements,
        PromptKind::NonFunctionalRequirements,
        PromptKind::TechnicalRequirements,
        PromptKind::FunctionalAnalysis,
        PromptKind::TechnicalAnalysis,
        PromptKind::ImpactAnalysis,
        PromptKind::Uml,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PromptKind::Overview => "overview",
            PromptKind::BusinessRequirements => "business_requirements",
            PromptKind::FunctionalRequirements => "functional_requirements",
            PromptKind::NonFunctionalRequirements => "non_functional_requirements",
            PromptKind::TechnicalRequirements => "technical_requirements",
            PromptKind::FunctionalAnalysis => "functional_analysis",
            PromptKind::TechnicalAnalysis => "technical_analysis",
            PromptKind::ImpactAnalysis => "impact_analysis",
            PromptKind::Uml => "uml",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            PromptKind::Overview => OVERVIEW,
            PromptKind::BusinessRequirements => BUSINESS_REQUIREMENTS,
            PromptKind::FunctionalRequirements => FUNCTIONAL_REQUIREMENTS,
            PromptKind::NonFunctionalRequirements => NON_FUNCTIONAL_REQUIREMENTS,
            PromptKind::TechnicalRequirements => TECHNICAL_REQUIREMENTS,
            PromptKind::FunctionalAnalysis => FUNCTIONAL_ANALYSIS,
            PromptKind::TechnicalAnalysis => TECHNICAL_ANALYSIS,
            PromptKind::ImpactAnalysis => IMPACT_ANALYSIS,
            PromptKind::Uml => UML,
        }
    }

    /// Embed the document text verbatim in the template. No escaping is
    /// applied; callers gate the text first (see the `input` module).
    pub fn render(self, document_text: &str) -> String {
        self.template().replacen(INPUT_SLOT, document_text, 1)
    }
}

/// Errors emitted while validating the template table at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateValidationError {
    #[error("prompt template `{kind}` must contain exactly one {{input}} slot (found {count})")]
    SlotCount { kind: &'static str, count: usize },
}

/// Startup invariant: every template carries exactly one substitution slot.
pub fn verify_templates() -> Result<(), TemplateValidationError> {
    for kind in PromptKind::ALL {
        let count = kind.template().matches(INPUT_SLOT).count();
        if count != 1 {
            return Err(TemplateValidationError::SlotCount {
                kind: kind.name(),
                count,
            });
        }
    }
    Ok(())
}
