use lopdf::Document;
use thiserror::Error;

use crate::errors::AppError;
use crate::pipeline::sniff::DetectedType;

/// Failure modes of text extraction. Converted into the HTTP-level taxonomy
/// with `into_app_error`, which attaches the upload's filename.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found")]
    NotFound,

    #[error("expected a file, got a directory")]
    IsDirectory,

    #[error("invalid PDF document: {0}")]
    InvalidPdf(String),

    #[error("invalid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl ExtractError {
    pub fn into_app_error(self, filename: &str) -> AppError {
        match self {
            ExtractError::NotFound => AppError::ExtractionNotFound(filename.to_string()),
            ExtractError::IsDirectory => AppError::ExtractionIsDirectory(filename.to_string()),
            other => AppError::Extraction {
                filename: filename.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Extracts raw text from classified bytes.
///
/// PDF: pages are walked in ascending page order and their text concatenated
/// with no separator between pages. The parsed document is dropped on every
/// exit path.
/// Other: the whole buffer is decoded as UTF-8 in one pass, no fallback
/// encoding.
pub fn extract(detected: DetectedType, bytes: &[u8]) -> Result<String, ExtractError> {
    match detected {
        DetectedType::Pdf => extract_pdf(bytes),
        DetectedType::Other => Ok(std::str::from_utf8(bytes)?.to_owned()),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(classify_pdf_error)?;

    let mut text = String::new();
    // get_pages returns a BTreeMap keyed by page number, so iteration is
    // first-to-last. No separator between pages.
    for (&page_number, _) in doc.get_pages().iter() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(classify_pdf_error)?;
        text.push_str(&page_text);
    }

    Ok(text)
}

/// Maps a lopdf failure onto the extraction taxonomy. Filesystem-shaped io
/// errors (surfaced when the parser reads through an io layer) keep their
/// distinct variants; everything else is a corrupt/invalid document.
fn classify_pdf_error(err: lopdf::Error) -> ExtractError {
    match find_io_kind(&err) {
        Some(std::io::ErrorKind::NotFound) => ExtractError::NotFound,
        Some(std::io::ErrorKind::IsADirectory) => ExtractError::IsDirectory,
        _ => ExtractError::InvalidPdf(err.to_string()),
    }
}

fn find_io_kind(err: &(dyn std::error::Error + 'static)) -> Option<std::io::ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        current = e.source();
    }
    None
}
