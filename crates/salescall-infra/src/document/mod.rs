//! Uploaded document readers.
//!
//! [`FileDocumentReader`] dispatches on the file extension:
//! `.pdf` via `pdf-extract`, `.pptx` by walking the slide XML inside the
//! zip container, and `.txt` / `.md` as UTF-8 text.

pub mod pdf;
pub mod pptx;

use std::path::Path;

use salescall_core::document::DocumentReader;
use salescall_types::chat::{DocumentKind, ReferenceDocument};
use salescall_types::error::DocumentError;

/// Reads PDF, PPTX and plain-text uploads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDocumentReader;

impl FileDocumentReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a document from disk (used for brand reference files).
    pub fn read_path(&self, path: &Path) -> Result<ReferenceDocument, DocumentError> {
        let bytes = std::fs::read(path).map_err(|e| DocumentError::Io(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.read(&file_name, &bytes)
    }
}

fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

impl DocumentReader for FileDocumentReader {
    fn read(&self, file_name: &str, bytes: &[u8]) -> Result<ReferenceDocument, DocumentError> {
        let ext = extension(file_name);
        let (kind, text) = match ext.as_str() {
            "pdf" => (DocumentKind::Pdf, pdf::extract_text(bytes)?),
            "pptx" => (DocumentKind::Pptx, pptx::extract_text(bytes)?),
            "txt" | "md" | "markdown" => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| DocumentError::Parse(format!("not valid UTF-8: {e}")))?;
                (DocumentKind::Text, text)
            }
            _ => return Err(DocumentError::Unsupported(ext)),
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(DocumentError::Empty(file_name.to_string()));
        }

        tracing::debug!(file_name, %kind, chars = text.chars().count(), "document text extracted");

        Ok(ReferenceDocument {
            file_name: file_name.to_string(),
            kind,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_plain_text() {
        let doc = FileDocumentReader::new()
            .read("notes.TXT", b"  Efficacy above 90%\n")
            .unwrap();
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.text, "Efficacy above 90%");
        assert_eq!(doc.file_name, "notes.TXT");
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let err = FileDocumentReader::new().read("deck.key", b"data").unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(ext) if ext == "key"));
    }

    #[test]
    fn test_rejects_blank_document() {
        let err = FileDocumentReader::new().read("blank.md", b"   \n").unwrap_err();
        assert!(matches!(err, DocumentError::Empty(_)));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let err = FileDocumentReader::new().read("bad.txt", &[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_read_path_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = FileDocumentReader::new()
            .read_path(&dir.path().join("missing.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn test_read_path_uses_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("brief.md");
        std::fs::write(&path, "# Key messages").unwrap();
        let doc = FileDocumentReader::new().read_path(&path).unwrap();
        assert_eq!(doc.file_name, "brief.md");
        assert_eq!(doc.text, "# Key messages");
    }
}
