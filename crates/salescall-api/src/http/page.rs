//! HTML page for one session: the form, the transcript and the reply tools.
//!
//! The template is compiled into the binary and rendered with minijinja
//! (auto-escaping on, since the template name ends in `.html`). The
//! transcript fragment comes pre-escaped from `render_transcript`.
//!
//! The reference panel previews whichever document the next turn draws on:
//! the session's upload, else the selected brand's reference file.

use axum::response::Html;
use minijinja::{Environment, context};
use serde::Serialize;

use salescall_core::chat::render::render_transcript;
use salescall_types::chat::ChatSession;
use salescall_types::selection::{OptionCatalog, Selection, SelectionField};

use crate::http::error::AppError;
use crate::state::AppState;

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Characters of reference text shown in the preview panel.
const REFERENCE_PREVIEW_CHARS: usize = 2000;

#[derive(Debug, Serialize)]
struct FieldView<'a> {
    key: &'static str,
    label: &'static str,
    multi: bool,
    options: Vec<OptionView<'a>>,
}

#[derive(Debug, Serialize)]
struct OptionView<'a> {
    value: &'a str,
    selected: bool,
}

pub fn template_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

fn field_views<'a>(catalog: &'a OptionCatalog, selection: &Selection) -> Vec<FieldView<'a>> {
    SelectionField::ALL
        .into_iter()
        .map(|field| {
            let chosen = selection.values(field);
            FieldView {
                key: field.key(),
                label: field.label(),
                multi: field.is_multi(),
                options: catalog
                    .options(field)
                    .into_iter()
                    .map(|value| OptionView {
                        value,
                        selected: chosen.contains(&value),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Render the page for `session`, with an optional inline error banner.
pub async fn render_page(
    state: &AppState,
    session: &ChatSession,
    error: Option<&str>,
) -> Result<Html<String>, AppError> {
    let catalog = state.conversation.catalog();
    let selection = match &session.last_selection {
        Some(selection) => selection.clone(),
        None => catalog
            .default_selection()
            .ok_or_else(|| AppError::Internal("option catalog is incomplete".to_string()))?,
    };
    let brand_image = catalog
        .brand(&selection.brand)
        .and_then(|b| b.image_url.as_deref());

    let brand_reference = match &session.reference {
        Some(_) => None,
        None => state.brands.load(catalog, &selection.brand).await,
    };
    let reference = session.reference.as_ref().or(brand_reference.as_deref());

    let template = state.templates.get_template("page.html")?;
    let html = template.render(context! {
        session_id => session.id.to_string(),
        fields => field_views(catalog, &selection),
        transcript_html => render_transcript(&session.transcript),
        has_reply => session.transcript.last_assistant().is_some(),
        error => error,
        brand => &selection.brand,
        brand_image => brand_image,
        reference_name => reference.map(|doc| doc.file_name.as_str()),
        reference_preview => reference.map(|doc| doc.excerpt(REFERENCE_PREVIEW_CHARS)),
        reference_truncated => reference.is_some_and(|doc| doc.excerpt(REFERENCE_PREVIEW_CHARS).len() < doc.text.len()),
        speech_enabled => state.speech.is_some(),
    })?;

    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{speech_state, state_with_config, test_state};
    use salescall_types::chat::{DocumentKind, Message, ReferenceDocument, Role};
    use salescall_types::config::AppConfig;

    #[test]
    fn test_template_compiles() {
        assert!(template_env().is_ok());
    }

    #[tokio::test]
    async fn test_empty_session_shows_every_field() {
        let state = test_state();
        let session = ChatSession::new();
        let Html(html) = render_page(&state, &session, None).await.unwrap();

        for field in SelectionField::ALL {
            assert!(html.contains(&format!("name=\"{}\"", field.key())), "missing {field}");
        }
        assert!(html.contains("Shingrix"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("/export"));
    }

    #[tokio::test]
    async fn test_error_banner_is_escaped() {
        let state = test_state();
        let session = ChatSession::new();
        let Html(html) = render_page(&state, &session, Some("<b>boom</b>")).await.unwrap();
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("&lt;b&gt;boom"));
        assert!(!html.contains("<b>boom"));
    }

    #[tokio::test]
    async fn test_reply_enables_download_and_keeps_selection() {
        let state = test_state();
        let mut session = ChatSession::new();
        let mut selection = state.conversation.catalog().default_selection().unwrap();
        selection.segment = "Engage".to_string();
        session.last_selection = Some(selection);
        session.transcript.push(Message::new(Role::User, "question"));
        session.transcript.push(Message::new(Role::Assistant, "answer"));

        let Html(html) = render_page(&state, &session, None).await.unwrap();
        assert!(html.contains("/export"));
        assert!(html.contains("<option value=\"Engage\" selected>"));
        assert!(html.contains("bubble assistant"));
    }

    #[tokio::test]
    async fn test_speech_controls_follow_configuration() {
        let session = ChatSession::new();

        let Html(without) = render_page(&test_state(), &session, None).await.unwrap();
        assert!(!without.contains("name=\"audio\""));
        assert!(without.contains("Speech features are disabled"));

        let Html(with) = render_page(&speech_state(), &session, None).await.unwrap();
        assert!(with.contains("name=\"audio\""));
    }

    #[tokio::test]
    async fn test_uploaded_reference_is_previewed() {
        let state = test_state();
        let mut session = ChatSession::new();
        session.reference = Some(ReferenceDocument {
            file_name: "deck.pptx".to_string(),
            kind: DocumentKind::Pptx,
            text: "Slide 1: <Two doses> for adults 50+".to_string(),
        });

        let Html(html) = render_page(&state, &session, None).await.unwrap();
        assert!(html.contains("Using: deck.pptx"));
        assert!(html.contains("Reference text preview"));
        assert!(html.contains("Slide 1: &lt;Two doses&gt; for adults 50+"));
        assert!(!html.contains("(truncated)"));
    }

    #[tokio::test]
    async fn test_long_reference_preview_is_truncated() {
        let state = test_state();
        let mut session = ChatSession::new();
        session.reference = Some(ReferenceDocument {
            file_name: "label.txt".to_string(),
            kind: DocumentKind::Text,
            text: "x".repeat(REFERENCE_PREVIEW_CHARS + 10),
        });

        let Html(html) = render_page(&state, &session, None).await.unwrap();
        assert!(html.contains(&"x".repeat(REFERENCE_PREVIEW_CHARS)));
        assert!(!html.contains(&"x".repeat(REFERENCE_PREVIEW_CHARS + 1)));
        assert!(html.contains("(truncated)"));
    }

    #[tokio::test]
    async fn test_brand_reference_is_previewed_without_upload() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Shingrix.pdf.txt"), "Recombinant zoster vaccine").unwrap();
        let mut config = AppConfig::default();
        config.server.assets_dir = tmp.path().display().to_string();
        for brand in &mut config.catalog.brands {
            brand.reference_document = Some(format!("{}.pdf.txt", brand.name));
        }
        let state = state_with_config(config);

        let Html(html) = render_page(&state, &ChatSession::new(), None).await.unwrap();
        assert!(html.contains("Using: Shingrix.pdf.txt"));
        assert!(html.contains("Recombinant zoster vaccine"));
    }

    #[tokio::test]
    async fn test_no_reference_hides_preview() {
        let Html(html) = render_page(&test_state(), &ChatSession::new(), None).await.unwrap();
        assert!(!html.contains("Reference text preview"));
    }
}
