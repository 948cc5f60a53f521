//! Axum router configuration with middleware.
//!
//! The HTML form lives at `/` and `/sessions/{id}/*`; the JSON API is nested
//! under `/api/v1/`. Middleware: request tracing. The form route takes
//! uploads up to `server.max_upload_bytes`; every other route keeps axum's
//! default body limit.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;

    let api_routes = Router::new()
        .route("/options", get(handlers::options::list_options))
        .route("/sessions", post(handlers::session::create_session))
        .route("/sessions/{id}", delete(handlers::session::delete_session))
        .route(
            "/sessions/{id}/messages",
            get(handlers::session::get_messages),
        )
        .route(
            "/sessions/{id}/turns",
            post(handlers::session::submit_turn),
        )
        .route(
            "/sessions/{id}/clear",
            post(handlers::session::clear_session),
        );

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/sessions/{id}", get(handlers::page::show))
        .route(
            "/sessions/{id}/turn",
            post(handlers::page::submit).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/sessions/{id}/clear", post(handlers::page::clear))
        .route("/sessions/{id}/export", get(handlers::page::export))
        .route("/sessions/{id}/speech", get(handlers::page::speech))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use salescall_types::config::AppConfig;

    use crate::state::test_support::{
        FailingProvider, speech_state, state_with, state_with_config, test_state,
    };

    const BOUNDARY: &str = "salescall-test-boundary";

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, headers, body)
    }

    async fn send_json(state: &AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, _, body) = send(state, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Text fields plus optional `(field, file name, bytes)` file parts.
    fn multipart(uri: &str, fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, file_name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn transcript_len(state: &AppState, id: Uuid) -> usize {
        state.sessions.get(&id).unwrap().lock().await.transcript.len()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let (status, json) = send_json(&test_state(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_creates_session_and_redirects() {
        let state = test_state();
        let (status, headers, _) = send(&state, get("/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("/sessions/"));
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_page_starts_over() {
        let (status, headers, _) = send(&test_state(), get(&format!("/sessions/{}", Uuid::now_v7()))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_invalid_session_id_is_bad_request() {
        let (status, json) = send_json(&test_state(), get("/api/v1/sessions/not-a-uuid/messages")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_form_turn_appends_two_messages_and_redirects() {
        let state = test_state();
        let id = state.sessions.create();

        let request = multipart(
            &format!("/sessions/{id}/turn"),
            &[
                ("brand", "Shingrix"),
                ("segment", "Act"),
                ("barriers", "Patient hesitancy"),
                ("message", "The doctor says patients refuse vaccines"),
            ],
            &[],
        );
        let (status, headers, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], format!("/sessions/{id}").as_str());
        assert_eq!(transcript_len(&state, id).await, 2);

        let (status, _, body) = send(&state, get(&format!("/sessions/{id}"))).await;
        let html = String::from_utf8(body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("The doctor says patients refuse vaccines"));
        assert!(html.contains("Coach: User input: The doctor says patients refuse vaccines"));
        assert!(html.contains("<option value=\"Act\" selected>"));
    }

    #[tokio::test]
    async fn test_form_turn_with_blank_message_is_ignored() {
        let state = test_state();
        let id = state.sessions.create();
        let request = multipart(&format!("/sessions/{id}/turn"), &[("message", "   ")], &[]);
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(transcript_len(&state, id).await, 0);
    }

    #[tokio::test]
    async fn test_form_turn_failure_renders_inline_error() {
        let state = state_with(FailingProvider, None);
        let id = state.sessions.create();
        let request = multipart(&format!("/sessions/{id}/turn"), &[("message", "hello")], &[]);

        let (status, _, body) = send(&state, request).await;
        let html = String::from_utf8(body).unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("upstream unavailable"));
        assert_eq!(transcript_len(&state, id).await, 1);
    }

    #[tokio::test]
    async fn test_form_turn_rejects_value_outside_catalog() {
        let state = test_state();
        let id = state.sessions.create();
        let request = multipart(
            &format!("/sessions/{id}/turn"),
            &[("tone", "Aggressive"), ("message", "hello")],
            &[],
        );
        let (status, _, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("Aggressive"));
        assert_eq!(transcript_len(&state, id).await, 0);
    }

    #[tokio::test]
    async fn test_uploaded_document_feeds_the_instruction() {
        let state = test_state();
        let id = state.sessions.create();
        let request = multipart(
            &format!("/sessions/{id}/turn"),
            &[("message", "Summarize the efficacy data")],
            &[("document", "efficacy.txt", b"97% efficacy in adults aged 50 and over")],
        );
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let handle = state.sessions.get(&id).unwrap();
        let session = handle.lock().await;
        let reference = session.reference.as_ref().unwrap();
        assert_eq!(reference.file_name, "efficacy.txt");
        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_document_is_rejected_without_turn() {
        let state = test_state();
        let id = state.sessions.create();
        let request = multipart(
            &format!("/sessions/{id}/turn"),
            &[("message", "hello")],
            &[("document", "deck.key", b"binary")],
        );
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(transcript_len(&state, id).await, 0);
    }

    #[tokio::test]
    async fn test_voice_clip_is_transcribed_when_message_is_blank() {
        let state = speech_state();
        let id = state.sessions.create();
        let request = multipart(
            &format!("/sessions/{id}/turn"),
            &[("message", "")],
            &[("audio", "clip.wav", &[1, 2, 3, 4])],
        );
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let handle = state.sessions.get(&id).unwrap();
        let session = handle.lock().await;
        assert_eq!(session.transcript.messages()[0].text(), "The doctor has no time");
    }

    #[tokio::test]
    async fn test_clear_empties_transcript() {
        let state = test_state();
        let id = state.sessions.create();
        send(&state, multipart(&format!("/sessions/{id}/turn"), &[("message", "one")], &[])).await;
        send(&state, multipart(&format!("/sessions/{id}/turn"), &[("message", "two")], &[])).await;
        assert_eq!(transcript_len(&state, id).await, 4);

        let request = Request::post(format!("/sessions/{id}/clear")).body(Body::empty()).unwrap();
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(transcript_len(&state, id).await, 0);
    }

    #[tokio::test]
    async fn test_export_without_reply_is_not_found() {
        let state = test_state();
        let id = state.sessions.create();
        let (status, json) = send_json(&state, get(&format!("/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "NOTHING_TO_EXPORT");
    }

    #[tokio::test]
    async fn test_export_returns_docx_attachment() {
        let state = test_state();
        let id = state.sessions.create();
        send(&state, multipart(&format!("/sessions/{id}/turn"), &[("message", "hello")], &[])).await;

        let (status, headers, body) = send(&state, get(&format!("/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .contains("AI_Response.docx")
        );
        assert_eq!(&body[..2], b"PK");
    }

    #[tokio::test]
    async fn test_speech_disabled_is_unavailable() {
        let state = test_state();
        let id = state.sessions.create();
        let (status, json) = send_json(&state, get(&format!("/sessions/{id}/speech"))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["errors"][0]["code"], "SPEECH_DISABLED");
    }

    #[tokio::test]
    async fn test_speech_reads_last_reply() {
        let state = speech_state();
        let id = state.sessions.create();
        send(&state, multipart(&format!("/sessions/{id}/turn"), &[("message", "hello")], &[])).await;

        let (status, headers, body) = send(&state, get(&format!("/sessions/{id}/speech"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(body, b"Coach: User input: hello");
    }

    #[tokio::test]
    async fn test_api_options_lists_every_field() {
        let (status, json) = send_json(&test_state(), get("/api/v1/options")).await;
        assert_eq!(status, StatusCode::OK);
        let fields = json["data"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[2]["key"], "segment");
        assert_eq!(fields[2]["options"][0], "Reach");
        assert_eq!(fields[3]["multi"], true);
        assert_eq!(json["data"]["speech_enabled"], false);
    }

    #[tokio::test]
    async fn test_api_session_lifecycle() {
        let state = test_state();

        let (status, json) = send_json(&state, Request::post("/api/v1/sessions").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let id = json["data"]["id"].as_str().unwrap().to_string();

        for i in 1..=2 {
            let (status, json) = send_json(
                &state,
                post_json(
                    &format!("/api/v1/sessions/{id}/turns"),
                    serde_json::json!({ "message": format!("question {i}") }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["outcome"], "replied");
            assert_eq!(json["data"]["message_count"], 2 * i);
        }

        let (_, json) = send_json(&state, get(&format!("/api/v1/sessions/{id}/messages"))).await;
        let messages = json["data"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");

        let (status, json) = send_json(
            &state,
            Request::post(format!("/api/v1/sessions/{id}/clear")).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["message_count"], 0);

        let (status, _) = send_json(
            &state,
            Request::delete(format!("/api/v1/sessions/{id}")).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_api_turn_failure_is_llm_error() {
        let state = state_with(FailingProvider, None);
        let id = state.sessions.create();
        let (status, json) = send_json(
            &state,
            post_json(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "hello" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["errors"][0]["code"], "LLM_ERROR");
        assert_eq!(transcript_len(&state, id).await, 1);
    }

    #[tokio::test]
    async fn test_api_turn_with_blank_message_is_ignored() {
        let state = test_state();
        let id = state.sessions.create();
        let (status, json) = send_json(
            &state,
            post_json(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["outcome"], "ignored");
        assert_eq!(json["data"]["message_count"], 0);
    }

    #[tokio::test]
    async fn test_api_unknown_session_is_not_found() {
        let (status, json) = send_json(
            &test_state(),
            get(&format!("/api/v1/sessions/{}/messages", Uuid::now_v7())),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_document_larger_than_default_body_limit_is_accepted() {
        let state = test_state();
        let id = state.sessions.create();
        let deck = vec![b'a'; 3 * 1024 * 1024];

        let (status, headers, _) = send(
            &state,
            multipart(
                &format!("/sessions/{id}/turn"),
                &[("message", "Summarize the deck")],
                &[("document", "deck.txt", &deck)],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], format!("/sessions/{id}").as_str());
        let handle = state.sessions.get(&id).unwrap();
        let session = handle.lock().await;
        assert_eq!(session.transcript.len(), 2);
        let reference = session.reference.as_ref().unwrap();
        assert_eq!(reference.file_name, "deck.txt");
        assert_eq!(reference.text.len(), deck.len());
    }

    #[tokio::test]
    async fn test_upload_over_limit_renders_inline_error() {
        let mut config = AppConfig::default();
        config.server.max_upload_bytes = 64 * 1024;
        let state = state_with_config(config);
        let id = state.sessions.create();
        let deck = vec![b'a'; 256 * 1024];

        let (status, headers, body) = send(
            &state,
            multipart(
                &format!("/sessions/{id}/turn"),
                &[("message", "Summarize the deck")],
                &[("document", "deck.txt", &deck)],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let content_type = headers[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("1 MB upload limit"));
        assert_eq!(transcript_len(&state, id).await, 0);
    }

    #[tokio::test]
    async fn test_index_hits_stay_within_session_cap() {
        let mut config = AppConfig::default();
        config.server.max_sessions = 16;
        let state = state_with_config(config);

        for _ in 0..200 {
            let (status, _, _) = send(&state, get("/")).await;
            assert_eq!(status, StatusCode::SEE_OTHER);
        }
        assert_eq!(state.sessions.len(), 16);
    }
}
