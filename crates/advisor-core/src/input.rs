//! Upload and content gates. Both run before any prompt is dispatched, so
//! a bad upload never costs a network call.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

use crate::error::{InputRejected, ValidationError};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "pdf", "docx", "xlsx"];
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
pub const MIN_DOCUMENT_CHARS: usize = 100;

const ZIP_CONTAINERS: [&str; 2] = ["docx", "xlsx"];

/// Crude prompt-injection guard: the templates embed document text
/// verbatim, so these phrases are refused outright.
const DENYLIST: [&str; 4] = ["forget", "ignore", "shutdown", "hack"];

static DENYLIST_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(DENYLIST)
        .expect("denylist automaton builds")
});

/// Lowercased extension of an uploaded filename, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
}

/// Check extension, size cap and container integrity of an upload.
/// Returns the normalized extension for the extractor on success.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<String, ValidationError> {
    let extension = file_extension(filename).unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedType {
            extension,
            allowed: ALLOWED_EXTENSIONS.join(", "),
        });
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size: bytes.len() });
    }
    if ZIP_CONTAINERS.contains(&extension.as_str()) && !has_zip_signature(bytes) {
        return Err(ValidationError::CorruptContainer { extension });
    }
    Ok(extension)
}

// Local-file-header or empty-archive signature. Full central-directory
// validation is left to the format extractors.
fn has_zip_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(b"PK\x05\x06")
}

/// Gate extracted text: long enough to analyze, free of denylisted phrases.
pub fn validate_document_text(text: &str) -> Result<(), InputRejected> {
    let length = text.chars().count();
    if length < MIN_DOCUMENT_CHARS {
        return Err(InputRejected::TooShort { length });
    }
    if DENYLIST_AUTOMATON.is_match(text) {
        return Err(InputRejected::Denylisted);
    }
    Ok(())
}
