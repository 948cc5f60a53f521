//! Minimal Word (.docx) writer.
//!
//! Produces an OOXML package with just the three parts Word needs to open a
//! document: `[Content_Types].xml`, `_rels/.rels` and `word/document.xml`.
//! The title becomes a bold 20pt paragraph; every line of the body becomes
//! its own paragraph.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use salescall_core::document::DocumentExporter;
use salescall_types::error::ExportError;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Writes a reply as a single-section Word document.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    file_name: String,
}

impl DocxExporter {
    pub fn new() -> Self {
        Self {
            file_name: "AI_Response.docx".to_string(),
        }
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn paragraph(text: &str, heading: bool) -> String {
    let props = if heading {
        r#"<w:rPr><w:b/><w:sz w:val="40"/></w:rPr>"#
    } else {
        ""
    };
    format!(
        r#"<w:p><w:r>{props}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

fn write_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Write(e.to_string())
}

fn document_xml(title: &str, body: &str) -> String {
    let mut paragraphs = paragraph(title, true);
    for line in body.lines() {
        paragraphs.push_str(&paragraph(line, false));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}</w:body></w:document>"#
    )
}

impl DocumentExporter for DocxExporter {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> &str {
        DOCX_CONTENT_TYPE
    }

    fn export(&self, title: &str, body: &str) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", RELS_XML.to_string()),
            ("word/document.xml", document_xml(title, body)),
        ];
        for (name, content) in parts {
            zip.start_file(name, options).map_err(write_err)?;
            zip.write_all(content.as_bytes()).map_err(write_err)?;
        }

        let cursor = zip.finish().map_err(write_err)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_package_has_required_parts() {
        let bytes = DocxExporter::new().export("AI Sales Call Response", "Hello").unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_title_and_lines_become_paragraphs() {
        let bytes = DocxExporter::new()
            .export("AI Sales Call Response", "Acknowledge the concern.\nProbe for details.")
            .unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert_eq!(xml.matches("<w:p>").count(), 3);
        assert!(xml.contains("AI Sales Call Response"));
        assert!(xml.contains("Probe for details."));
    }

    #[test]
    fn test_reply_text_is_xml_escaped() {
        let bytes = DocxExporter::new().export("Title", "Efficacy <90% & \"rising\"").unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("Efficacy &lt;90% &amp; &quot;rising&quot;"));
    }

    #[test]
    fn test_file_name_and_content_type() {
        let exporter = DocxExporter::new();
        assert_eq!(exporter.file_name(), "AI_Response.docx");
        assert!(exporter.content_type().ends_with("wordprocessingml.document"));
    }
}
