//! Multipart form parsing for `POST /sessions/{id}/turn`.
//!
//! Field names match [`SelectionField::key`]; `barriers` may repeat.
//! `message` carries typed text, `audio` an optional voice clip and
//! `document` an optional PDF/PPTX/text upload. Empty file inputs are
//! ignored.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use salescall_types::selection::{OptionCatalog, Selection, SelectionField};

use crate::http::error::AppError;
use crate::turn::Upload;

#[derive(Debug, Default)]
pub struct TurnForm {
    values: HashMap<String, String>,
    barriers: Vec<String>,
    pub message: String,
    pub audio: Option<Upload>,
    pub document: Option<Upload>,
}

/// Map a multipart read failure, naming the size limit when it was hit.
fn bad_form(e: MultipartError, max_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "the submitted form is larger than the {} MB upload limit",
            max_bytes.div_ceil(1024 * 1024)
        ))
    } else {
        AppError::Validation(format!("invalid form data: {}", e.body_text()))
    }
}

impl TurnForm {
    /// Read every part of the form. `max_bytes` is the body limit applied
    /// to the route, used only to word the error when it is exceeded.
    pub async fn from_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<Self, AppError> {
        let mut form = TurnForm::default();
        let form_error = |e| bad_form(e, max_bytes);

        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audio" | "document" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(form_error)?;
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }
                    let upload = Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    };
                    if name == "audio" {
                        form.audio = Some(upload);
                    } else {
                        form.document = Some(upload);
                    }
                }
                _ => {
                    let value = field.text().await.map_err(form_error)?;
                    form.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    fn insert(&mut self, name: String, value: String) {
        match name.as_str() {
            "message" => self.message = value,
            "barriers" => self.barriers.push(value),
            _ => {
                self.values.insert(name, value);
            }
        }
    }

    /// Selection from the submitted fields.
    ///
    /// Single-select fields that were not submitted take the catalog's first
    /// option. Submitted values are returned as-is and validated later.
    pub fn selection(&self, catalog: &OptionCatalog) -> Result<Selection, AppError> {
        let mut selection = catalog
            .default_selection()
            .ok_or_else(|| AppError::Internal("option catalog is incomplete".to_string()))?;

        for field in SelectionField::ALL {
            let Some(value) = self.values.get(field.key()) else {
                continue;
            };
            let slot = match field {
                SelectionField::Language => &mut selection.language,
                SelectionField::Brand => &mut selection.brand,
                SelectionField::Segment => &mut selection.segment,
                SelectionField::Objective => &mut selection.objective,
                SelectionField::Specialty => &mut selection.specialty,
                SelectionField::Persona => &mut selection.persona,
                SelectionField::Length => &mut selection.length,
                SelectionField::Tone => &mut selection.tone,
                SelectionField::Barrier => continue,
            };
            *slot = value.clone();
        }
        selection.barriers = self.barriers.clone();

        Ok(selection)
    }
}
