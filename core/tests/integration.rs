//! Every client operation against the live mock server.
//!
//! Starts the mock server on a random port, then drives `UberduckClient`
//! over real HTTP through `UreqTransport`. The server's request log is used
//! to check what actually went over the wire.

use std::sync::Arc;
use std::thread;

use mock_server::{RecordedRequest, RequestLog, MISSING_VOICE, NOT_JSON_VOICE};
use serde_json::json;
use uberduck_core::types::{BackingTracks, FreestyleResult, Lyrics, Voice, VoiceSample};
use uberduck_core::{
    decode_as, ApiError, ClientConfig, Credentials, FreestyleMetadata, FreestyleRequest, LyricsRequest,
    QueryParams, StatusPolicy, UberduckClient,
};

const AUTH: &str = "Basic dGVzdGluZ19rZXk6dGVzdGluZ19zZWNyZXQ=";

/// Start the mock server on a random port and return its base URL and log.
fn start_server() -> (String, RequestLog) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let log = RequestLog::default();
    let server_log = log.clone();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_log(listener, server_log).await
        })
        .unwrap();
    });

    (format!("http://{addr}/"), log)
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(Credentials::new("testing_key", "testing_secret")).with_base_url(base_url)
}

fn recorded(log: &RequestLog) -> Vec<RecordedRequest> {
    log.blocking_read().clone()
}

#[test]
fn every_operation_round_trips() {
    let (base_url, log) = start_server();
    let client = UberduckClient::new(config(&base_url));

    // Step 1: lyrics.
    let lyrics = client
        .generate_lyrics(&LyricsRequest {
            subject: "lofi is awesome".to_string(),
            lines: vec![16],
        })
        .unwrap();
    let lyrics: Lyrics = decode_as(lyrics).unwrap();
    assert_eq!(lyrics.title, "Lofi Magic");

    // Step 2: voices with a query string.
    let voices = client.list_voices([("mode", "tts-reference")]).unwrap();
    let voices: Vec<Voice> = decode_as(voices).unwrap();
    assert_eq!(voices.len(), 2);

    // Step 3: samples for one voice.
    let samples = client
        .list_voice_samples("639f5a27-edbc-444f-bfe9-c7b62aa014f8")
        .unwrap();
    let samples: Vec<VoiceSample> = decode_as(samples).unwrap();
    assert_eq!(samples.len(), 2);

    // Step 4: backing tracks.
    let tracks: BackingTracks = decode_as(client.list_backing_tracks().unwrap()).unwrap();
    let track = &tracks.backing_tracks[0];

    // Step 5: freestyle on the first backing track.
    let request = FreestyleRequest {
        backing_track: track.uuid.to_string(),
        voicemodel_uuid: voices[0].voicemodel_uuid.to_string(),
        lyrics: lyrics.lyrics.clone(),
        lines: Some(4),
        title: "New beat".to_string(),
        render_video: Some(true),
        metadata: Some(FreestyleMetadata {
            add_watermark: Some(false),
            ..Default::default()
        }),
        extra: Default::default(),
    };
    let result: FreestyleResult = decode_as(client.generate_freestyle(&request).unwrap()).unwrap();
    assert_eq!(result.title, "New beat");
    assert!(result.render_video_response.is_some());

    // Step 6: custom prompt with and without variables.
    let completion = client.custom_prompt::<serde_json::Value>("japanese-lyrics", None).unwrap();
    assert_eq!(completion["object"], "chat.completion");
    client
        .custom_prompt("japanese-lyrics", Some(&json!({ "lyrics": "japanese" })))
        .unwrap();

    // Step 7: the wire log matches what each operation promises.
    let log = recorded(&log);
    assert_eq!(log.len(), 7);
    for entry in &log {
        assert_eq!(entry.authorization.as_deref(), Some(AUTH), "{}", entry.uri);
        assert_eq!(entry.content_type.as_deref(), Some("application/json"), "{}", entry.uri);
    }
    let calls: Vec<(&str, &str)> = log.iter().map(|e| (e.method.as_str(), e.uri.as_str())).collect();
    assert_eq!(
        calls,
        vec![
            ("POST", "/tts/lyrics"),
            ("GET", "/voices?mode=tts-reference"),
            ("GET", "/voices/639f5a27-edbc-444f-bfe9-c7b62aa014f8/samples"),
            ("GET", "/reference-audio/backing-tracks"),
            ("POST", "/tts/freestyle"),
            ("POST", "/templates/deployments/japanese-lyrics/generate"),
            ("POST", "/templates/deployments/japanese-lyrics/generate"),
        ]
    );

    let sent: serde_json::Value = serde_json::from_str(&log[4].body).unwrap();
    assert_eq!(sent, serde_json::to_value(&request).unwrap());
    assert_eq!(log[5].body, r#"{"variables":{}}"#);
    assert_eq!(log[6].body, r#"{"variables":{"lyrics":"japanese"}}"#);
    assert!(log[1].body.is_empty());
}

#[test]
fn missing_credentials_are_rejected_by_the_server_as_data() {
    let (base_url, log) = start_server();
    let client = UberduckClient::new(ClientConfig::default().with_base_url(&base_url));

    let result = client.list_backing_tracks().unwrap();
    assert_eq!(result, json!({ "detail": "Not authenticated" }));
    assert!(recorded(&log)[0].authorization.is_none());
}

#[test]
fn strict_policy_surfaces_error_statuses() {
    let (base_url, _log) = start_server();
    let client = UberduckClient::new(config(&base_url).with_status_policy(StatusPolicy::Strict));

    let err = client.list_voice_samples(MISSING_VOICE).unwrap_err();
    match err {
        ApiError::HttpError { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Not found"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }

    // Pass-through still decodes the same 404 as data.
    let lenient = UberduckClient::new(config(&base_url));
    let result = lenient.list_voice_samples(MISSING_VOICE).unwrap();
    assert_eq!(result["detail"], "Not found");
}

#[test]
fn non_json_response_is_a_decode_error() {
    let (base_url, _log) = start_server();
    let client = UberduckClient::new(config(&base_url));

    let err = client.list_voice_samples(NOT_JSON_VOICE).unwrap_err();
    assert!(matches!(err, ApiError::DecodeError(_)));
}

#[test]
fn unreachable_server_is_a_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = UberduckClient::new(config(&format!("http://{addr}")));

    let err = client.list_backing_tracks().unwrap_err();
    assert!(matches!(err, ApiError::NetworkError(_)));
}

#[test]
fn one_client_serves_concurrent_callers() {
    let (base_url, log) = start_server();
    let client = Arc::new(UberduckClient::new(config(&base_url)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                let params = QueryParams::new().append("mode", "tts-reference").append("page", i.to_string());
                client.list_voices(params).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let voices = handle.join().unwrap();
        assert_eq!(voices.as_array().unwrap().len(), 2);
    }
    assert_eq!(recorded(&log).len(), 8);
}
