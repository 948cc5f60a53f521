//! PDF text extraction.

use salescall_types::error::DocumentError;

pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::Parse(format!("PDF parse error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(err.to_string().contains("PDF parse error"));
    }
}
