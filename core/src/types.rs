//! Request payloads and typed views of common responses.
//!
//! # Design
//! Client methods return `serde_json::Value` unchanged; these structs are an
//! opt-in layer on top. `decode_as` converts a returned value into one of
//! them. Unknown response fields are ignored so new server-side fields do not
//! break callers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// Body for `generate_lyrics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LyricsRequest {
    pub subject: String,
    /// Line count per verse.
    pub lines: Vec<u32>,
}

/// Body for `generate_freestyle`. Optional fields are omitted when `None`.
///
/// Keys without a dedicated field are kept in `extra` and sent back out
/// unchanged, so a request deserialized from caller JSON round-trips intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreestyleRequest {
    /// Backing track UUID.
    pub backing_track: String,
    pub voicemodel_uuid: String,
    /// One inner list of lines per verse.
    pub lyrics: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_video: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FreestyleMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreestyleMetadata {
    #[serde(rename = "addWatermark", default, skip_serializing_if = "Option::is_none")]
    pub add_watermark: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of `list_voices`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub voicemodel_uuid: Uuid,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub language: Option<String>,
}

/// Entry of `list_voice_samples`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VoiceSample {
    pub transcription: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackingTracks {
    pub backing_tracks: Vec<BackingTrack>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackingTrack {
    pub uuid: Uuid,
    pub name: String,
    pub bpm: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Verse {
    pub label: String,
    /// Offset in seconds.
    pub start: f64,
    pub length_in_measures: u32,
}

/// Result of `generate_lyrics`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Lyrics {
    pub title: String,
    pub lyrics: Vec<Vec<String>>,
}

/// Result of `generate_freestyle`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FreestyleResult {
    pub mix_url: String,
    pub vocals_url: String,
    pub title: String,
    pub render_uuid: Uuid,
    #[serde(default)]
    pub render_video_response: Option<String>,
    #[serde(default)]
    pub timestamps: Option<Value>,
    #[serde(default)]
    pub bpm: Option<f64>,
}

/// Convert a decoded response into a typed view.
pub fn decode_as<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::DecodeError(e.to_string()))
}
