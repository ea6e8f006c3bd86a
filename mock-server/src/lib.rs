use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub mod fixtures;

/// Voice id whose sample listing answers with a non-JSON body.
pub const NOT_JSON_VOICE: &str = "not-json";
/// Voice id whose sample listing answers 404.
pub const MISSING_VOICE: &str = "missing";

/// One request as seen by the mock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, exactly as received.
    pub uri: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

#[derive(Deserialize)]
struct FreestyleBody {
    backing_track: String,
    voicemodel_uuid: String,
    lyrics: Vec<Vec<String>>,
    title: String,
    #[serde(default)]
    render_video: bool,
}

#[derive(Deserialize)]
struct PromptBody {
    variables: serde_json::Map<String, Value>,
}

pub fn app() -> Router {
    app_with_log(RequestLog::default())
}

pub fn app_with_log(log: RequestLog) -> Router {
    Router::new()
        .route("/tts/lyrics", post(generate_lyrics))
        .route("/tts/freestyle", post(generate_freestyle))
        .route("/voices", get(list_voices))
        .route("/voices/{id}/samples", get(list_voice_samples))
        .route("/reference-audio/backing-tracks", get(list_backing_tracks))
        .route("/templates/deployments/{key}/generate", post(custom_prompt))
        .with_state(log)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_log(listener: TcpListener, log: RequestLog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_log(log)).await
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Record the request, then reject it if it carries no basic credentials.
async fn record(
    log: &RequestLog,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &str,
) -> Result<(), Response> {
    let entry = RecordedRequest {
        method: method.to_string(),
        uri: uri.to_string(),
        content_type: header_value(headers, header::CONTENT_TYPE),
        authorization: header_value(headers, header::AUTHORIZATION),
        body: body.to_string(),
    };
    debug!(method = %entry.method, uri = %entry.uri, "mock request");
    let authorized = entry
        .authorization
        .as_deref()
        .is_some_and(|v| v.starts_with("Basic ") && v.len() > "Basic ".len());
    log.write().await.push(entry);

    if authorized {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Not authenticated"))
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn generate_lyrics(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, &body).await {
        return rejection;
    }
    match serde_json::from_str::<Value>(&body) {
        Ok(_) => Json(fixtures::lyrics()).into_response(),
        Err(_) => detail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid JSON body"),
    }
}

async fn generate_freestyle(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, &body).await {
        return rejection;
    }
    let input: FreestyleBody = match serde_json::from_str(&body) {
        Ok(input) => input,
        Err(_) => return detail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid freestyle request"),
    };
    if input.lyrics.is_empty() || input.backing_track.is_empty() || input.voicemodel_uuid.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid freestyle request");
    }
    let render_uuid = Uuid::new_v4();
    let render_video_response = input
        .render_video
        .then(|| format!("https://assets.example.invalid/{render_uuid}.mp4"));
    Json(json!({
        "mix_url": format!("https://outputs.example.invalid/{render_uuid}.wav"),
        "vocals_url": format!("https://outputs.example.invalid/{render_uuid}.mp3"),
        "title": input.title,
        "render_uuid": render_uuid,
        "render_video_response": render_video_response,
        "timestamps": null,
        "bpm": 100
    }))
    .into_response()
}

async fn list_voices(
    State(log): State<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, "").await {
        return rejection;
    }
    let voices = fixtures::voices();
    match params.get("language") {
        Some(language) => {
            let filtered: Vec<Value> = voices
                .as_array()
                .into_iter()
                .flatten()
                .filter(|v| v["language"] == language.as_str())
                .cloned()
                .collect();
            Json(Value::Array(filtered)).into_response()
        }
        None => Json(voices).into_response(),
    }
}

async fn list_voice_samples(
    State(log): State<RequestLog>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, "").await {
        return rejection;
    }
    match id.as_str() {
        NOT_JSON_VOICE => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            "Internal Server Error",
        )
            .into_response(),
        MISSING_VOICE => detail(StatusCode::NOT_FOUND, "Not found"),
        _ => Json(fixtures::voice_samples(&id)).into_response(),
    }
}

async fn list_backing_tracks(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, "").await {
        return rejection;
    }
    Json(fixtures::backing_tracks()).into_response()
}

async fn custom_prompt(
    State(log): State<RequestLog>,
    Path(key): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(rejection) = record(&log, &method, &uri, &headers, &body).await {
        return rejection;
    }
    match serde_json::from_str::<PromptBody>(&body) {
        Ok(prompt) => {
            debug!(key = %key, variables = prompt.variables.len(), "template invoked");
            Json(fixtures::chat_completion(&key)).into_response()
        }
        Err(_) => detail(StatusCode::UNPROCESSABLE_ENTITY, "variables must be an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_request_serializes_to_json() {
        let entry = RecordedRequest {
            method: "GET".to_string(),
            uri: "/voices?mode=tts-reference".to_string(),
            content_type: Some("application/json".to_string()),
            authorization: None,
            body: String::new(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["uri"], "/voices?mode=tts-reference");
        assert!(json["authorization"].is_null());
    }

    #[test]
    fn freestyle_body_defaults_render_video_to_false() {
        let input: FreestyleBody = serde_json::from_str(
            r#"{"backing_track":"b","voicemodel_uuid":"v","lyrics":[["line"]],"title":"t"}"#,
        )
        .unwrap();
        assert!(!input.render_video);
    }

    #[test]
    fn freestyle_body_rejects_missing_title() {
        let result: Result<FreestyleBody, _> =
            serde_json::from_str(r#"{"backing_track":"b","voicemodel_uuid":"v","lyrics":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn prompt_body_requires_object_variables() {
        assert!(serde_json::from_str::<PromptBody>(r#"{"variables":{}}"#).is_ok());
        assert!(serde_json::from_str::<PromptBody>(r#"{"variables":"x"}"#).is_err());
        assert!(serde_json::from_str::<PromptBody>(r#"{}"#).is_err());
    }

    #[test]
    fn voice_samples_fixture_embeds_voice_id() {
        let samples = fixtures::voice_samples("abc");
        assert!(samples[0]["url"].as_str().unwrap().contains("/abc/"));
    }
}
