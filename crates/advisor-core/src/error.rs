use reqwest::StatusCode;
use thiserror::Error;

/// Rejections raised by the upload boundary before any file content is
/// interpreted.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported file type. Allowed: {allowed}")]
    UnsupportedType { extension: String, allowed: String },
    #[error("File size exceeds 25 MB limit")]
    TooLarge { size: usize },
    #[error("Invalid {extension} file: Not a valid ZIP file")]
    CorruptContainer { extension: String },
}

/// Format-specific text extraction failures.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No text extracted from {format}")]
    Empty { format: String },
    #[error("No extractor available for {format} input")]
    Unsupported { format: String },
}

/// Extracted text refused by the pre-dispatch gate.
#[derive(Debug, Error)]
pub enum InputRejected {
    #[error("Extracted text must be at least 100 characters")]
    TooShort { length: usize },
    #[error("Invalid content detected")]
    Denylisted,
}

/// Failure of a single prompt dispatch. A transport-level problem is never
/// mapped to empty response text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request to the generative API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generative API returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("malformed generative API response: {reason}")]
    Malformed { reason: String },
}

/// Umbrella error surfaced by the analysis pipeline. Validation, extraction
/// and rejection short-circuit before any dispatch; a dispatch failure
/// aborts the whole analysis.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Rejected(#[from] InputRejected),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_short_and_human_readable() {
        let err = ValidationError::TooLarge { size: 30 << 20 };
        assert_eq!(err.to_string(), "File size exceeds 25 MB limit");

        let err = InputRejected::Denylisted;
        assert_eq!(err.to_string(), "Invalid content detected");

        let err = ExtractionError::Empty {
            format: "TXT".into(),
        };
        assert_eq!(err.to_string(), "No text extracted from TXT");
    }

    #[test]
    fn dispatch_error_carries_status_and_body() {
        let err = DispatchError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "quota exceeded".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("500"));
        assert!(rendered.contains("quota exceeded"));
    }

    #[test]
    fn umbrella_error_preserves_inner_message() {
        let err = AdvisorError::from(InputRejected::TooShort { length: 12 });
        assert!(err.to_string().contains("at least 100 characters"));
    }
}
