//! Slide-deck text extraction.
//!
//! A `.pptx` file is a zip container; each slide lives at
//! `ppt/slides/slideN.xml` and its visible text is in `<a:t>` runs grouped
//! into `<a:p>` paragraphs. Slides are emitted in numeric order
//! (`slide2` before `slide10`).

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use salescall_types::error::DocumentError;

const SLIDE_PREFIX: &str = "ppt/slides/slide";

fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Parse(format!("not a slide deck: {e}")))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    let mut sections = Vec::with_capacity(slides.len());
    for (number, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| DocumentError::Parse(format!("{name}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| DocumentError::Io(format!("{name}: {e}")))?;

        let paragraphs = slide_paragraphs(&xml)?;
        if !paragraphs.is_empty() {
            sections.push(format!("Slide {number}:\n{}", paragraphs.join("\n")));
        }
    }

    Ok(sections.join("\n\n"))
}

fn slide_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"a:t" => in_text = false,
            Ok(Event::End(e)) if e.name().as_ref() == b"a:p" => {
                let line = current.trim();
                if !line.is_empty() {
                    paragraphs.push(line.to_string());
                }
                current.clear();
            }
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| DocumentError::Parse(format!("slide text: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Parse(format!(
                    "slide XML error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
