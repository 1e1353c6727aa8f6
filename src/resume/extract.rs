//! Raw text extraction from resume files.
//!
//! Dispatch is by file extension; anything other than PDF or DOCX is
//! rejected before any extraction work happens.

use crate::error::{Result, ScoutError};
use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use std::io::Cursor;
use tracing::debug;

/// Fixed message for a file type we do not handle.
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Please upload a .pdf or .docx file.";

/// Extract raw text from resume file bytes, dispatching on the file name's
/// extension.
pub fn extract_text(file_bytes: &[u8], file_name: &str) -> Result<String> {
    let lower = file_name.to_lowercase();

    let raw_text = if lower.ends_with(".pdf") {
        extract_pdf(file_bytes)?
    } else if lower.ends_with(".docx") {
        extract_docx(file_bytes)?
    } else {
        return Err(ScoutError::Resume(UNSUPPORTED_FILE_MESSAGE.to_string()));
    };

    if raw_text.trim().is_empty() {
        return Err(ScoutError::Resume(
            "Could not extract any text from the resume.".to_string(),
        ));
    }

    debug!("Extracted {} characters from {}", raw_text.len(), file_name);
    Ok(raw_text)
}

fn extract_pdf(file_bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(file_bytes)
        .map_err(|e| ScoutError::Resume(format!("Failed to read PDF: {}", e)))
}

fn extract_docx(file_bytes: &[u8]) -> Result<String> {
    let docx_file = DocxFile::from_reader(Cursor::new(file_bytes))
        .map_err(|e| ScoutError::Resume(format!("Failed to open DOCX: {:?}", e)))?;
    let docx = docx_file
        .parse()
        .map_err(|e| ScoutError::Resume(format!("Failed to parse DOCX: {:?}", e)))?;

    let mut lines = Vec::new();
    for content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = content {
            let line: String = paragraph
                .iter_text()
                .map(|t| t.as_ref())
                .collect::<Vec<_>>()
                .join("");
            lines.push(line);
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = extract_text(b"some notes", "notes.txt").unwrap_err();
        match err {
            ScoutError::Resume(msg) => assert_eq!(msg, UNSUPPORTED_FILE_MESSAGE),
            other => panic!("Expected Resume error, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        // Garbage bytes: must get past the extension gate and fail in the
        // PDF reader, not with the unsupported-type message.
        let err = extract_text(b"not a pdf", "Resume.PDF").unwrap_err();
        match err {
            ScoutError::Resume(msg) => assert_ne!(msg, UNSUPPORTED_FILE_MESSAGE),
            other => panic!("Expected Resume error, got {:?}", other),
        }
    }
}
