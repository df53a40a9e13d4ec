pub mod analysis;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod input;
pub mod llm;
pub mod parse;
pub mod prompt;
pub mod report;

pub use analysis::{run_analysis, Advisor, AnalysisResult};
pub use error::{
    AdvisorError, DispatchError, ExtractionError, InputRejected, ValidationError,
};
pub use extract::{PlainTextExtractor, TextExtractor};
pub use input::{validate_document_text, validate_upload};
pub use llm::{GeminiClient, LlmClient, LlmSettings, NoopClient};
pub use prompt::PromptKind;
pub use report::{render_report, report_path, OutputFormat};
