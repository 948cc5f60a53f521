//! Document collaborator ports.
//!
//! Reading uploaded files into text and writing the Word export are both
//! CPU-bound and synchronous; callers run them on a blocking thread.

use salescall_types::chat::ReferenceDocument;
use salescall_types::error::{DocumentError, ExportError};

/// Extracts plain text from an uploaded file.
pub trait DocumentReader: Send + Sync {
    /// Parse `bytes` according to the extension of `file_name`.
    fn read(&self, file_name: &str, bytes: &[u8]) -> Result<ReferenceDocument, DocumentError>;
}

/// Produces a downloadable document from a reply.
pub trait DocumentExporter: Send + Sync {
    /// File name offered to the browser.
    fn file_name(&self) -> &str;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &str;

    fn export(&self, title: &str, body: &str) -> Result<Vec<u8>, ExportError>;
}
