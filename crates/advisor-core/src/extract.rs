use crate::error::ExtractionError;

/// Converts a validated upload into plain text. The analysis pipeline
/// treats extraction as opaque; it only ever sees the resulting string.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], format: &str) -> Result<String, ExtractionError>;
}

/// Extractor for plain-text uploads. The binary document formats (pdf,
/// docx, xlsx) require dedicated format extractors and are refused here.
#[derive(Debug, Default, Clone)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], format: &str) -> Result<String, ExtractionError> {
        match format {
            "txt" => {
                let text = String::from_utf8_lossy(bytes).into_owned();
                if text.trim().is_empty() {
                    return Err(ExtractionError::Empty {
                        format: "TXT".into(),
                    });
                }
                Ok(text)
            }
            other => Err(ExtractionError::Unsupported {
                format: other.to_string(),
            }),
        }
    }
}
