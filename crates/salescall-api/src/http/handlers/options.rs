//! Option catalog handler.
//!
//! - GET /api/v1/options - Allowed values for every form field

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use salescall_types::selection::SelectionField;

use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FieldOptions {
    pub key: &'static str,
    pub label: &'static str,
    pub multi: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub fields: Vec<FieldOptions>,
    pub speech_enabled: bool,
}

/// Every field in form order with its allowed values.
pub fn field_options(catalog: &salescall_types::selection::OptionCatalog) -> Vec<FieldOptions> {
    SelectionField::ALL
        .into_iter()
        .map(|field| FieldOptions {
            key: field.key(),
            label: field.label(),
            multi: field.is_multi(),
            options: catalog.options(field).into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// GET /api/v1/options
pub async fn list_options(State(state): State<AppState>) -> Json<ApiResponse<OptionsResponse>> {
    let start = Instant::now();
    let data = OptionsResponse {
        fields: field_options(state.conversation.catalog()),
        speech_enabled: state.speech.is_some(),
    };
    let resp = ApiResponse::success(data, Uuid::now_v7().to_string(), start.elapsed().as_millis() as u64)
        .with_link("self", "/api/v1/options");
    Json(resp)
}
