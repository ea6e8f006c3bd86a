//! Canned response bodies served by the mock endpoints.

use serde_json::{json, Value};

pub fn lyrics() -> Value {
    json!({
        "title": "Lofi Magic",
        "lyrics": [[
            "Lofi is awesome, it's like a warm embrace",
            "Soothing my soul, putting me in a peaceful space",
            "Beats like a gentle breeze, melodies like a lullaby",
            "It's a masterpiece of sound, elevating me so high"
        ]]
    })
}

pub fn voices() -> Value {
    json!([
        {
            "category": "",
            "display_name": "German Male",
            "is_private": true,
            "name": "german-male",
            "voicemodel_uuid": "28e13832-5bff-45f5-8b19-126d9e771f5b",
            "language": "german"
        },
        {
            "category": "",
            "display_name": "Oursong English",
            "is_private": true,
            "name": "oursong-english",
            "voicemodel_uuid": "bb25b435-7e5c-4cab-9b0b-ff14b3fdd50b",
            "language": "english"
        }
    ])
}

pub fn voice_samples(voice_id: &str) -> Value {
    json!([
        {
            "transcription": "Now this is a story all about how my life got flipped turned upside down.",
            "url": format!("https://audio.example.invalid/{voice_id}/0/audio.wav")
        },
        {
            "transcription": "They told him don't you ever come around here, don't wanna see your face.",
            "url": format!("https://audio.example.invalid/{voice_id}/1/audio.wav")
        }
    ])
}

pub fn backing_tracks() -> Value {
    json!({
        "backing_tracks": [
            {
                "bpm": 102.0,
                "uuid": "726f4142-c85a-4afc-a1e8-e76342692329",
                "name": "$eries A (Hip Hop)",
                "source": "Custom",
                "bucket": "uberduck-reference-audio",
                "path": "1735361/RnBH 8 (102bpm Dm).wav",
                "is_public": true,
                "verses": [{ "label": "Verse 1", "start": 9.4118, "length_in_measures": 20 }]
            },
            {
                "bpm": 109.0,
                "uuid": "2008268e-583a-407d-9ae9-b2a8593a35b4",
                "name": "Burn rate (Hip Hop)",
                "source": "Custom",
                "bucket": "uberduck-reference-audio",
                "path": "1735361/RnBH 15 (109bpm Bm).wav",
                "is_public": true,
                "verses": [{ "label": "Verse 1", "start": 17.604874376922428, "length_in_measures": 16 }]
            }
        ]
    })
}

pub fn chat_completion(template_key: &str) -> Value {
    json!({
        "choices": [{
            "finish_reason": "stop",
            "index": 0,
            "logprobs": null,
            "message": {
                "content": format!("generated by template {template_key}"),
                "role": "assistant",
                "function_call": null,
                "tool_calls": null
            }
        }],
        "created": 1708759229,
        "id": "test",
        "model": "gpt-35-turbo",
        "object": "chat.completion",
        "usage": { "completion_tokens": 296, "prompt_tokens": 45, "total_tokens": 341 }
    })
}
