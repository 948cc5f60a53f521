//! Reply export formats.

pub mod docx;
