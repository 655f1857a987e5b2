//! Content creator: captions, generated playlists, and short script outlines.

use crate::core::ledger;
use crate::core::limits::clamp_limit;
use crate::core::output::title_case;
use crate::core::store::Store;
use crate::core::time::tool_envelope;
use crate::plugins::settle;
use serde_json::{Value, json};

pub const AGENT_NAME: &str = "content_creator_agent";

const CAPTION_MAX_CHARS: usize = 140;
const PLAYLIST_MAX_LENGTH: i64 = 100;

pub fn generate_caption(text: &str, tone: &str) -> Value {
    let tone = tone.to_uppercase();
    let caption = if text.chars().count() > CAPTION_MAX_CHARS {
        let head: String = text.chars().take(CAPTION_MAX_CHARS).collect();
        format!("[{tone}] {head}...")
    } else {
        format!("[{tone}] {text}")
    };
    tool_envelope("success", json!({ "caption": caption }))
}

/// Build `length` items spread evenly over the comma-separated genres.
///
/// Each genre contributes `max(1, length / genre_count)` items numbered by the
/// genre's position; the result is truncated to `length`.
pub fn playlist_items(genres: &str, length: i64) -> Vec<String> {
    let length = clamp_limit(length, 1, PLAYLIST_MAX_LENGTH) as usize;
    let genre_list: Vec<&str> = genres.split(',').collect();
    let per_genre = (length / genre_list.len().max(1)).max(1);
    genre_list
        .iter()
        .enumerate()
        .flat_map(|(i, g)| {
            let label = format!("{} Song {}", title_case(g.trim()), i + 1);
            std::iter::repeat_n(label, per_genre)
        })
        .take(length)
        .collect()
}

pub fn make_playlist(store: &Store, genres: &str, length: i64) -> Value {
    let items = playlist_items(genres, length);
    settle(
        ledger::append_playlist(store, &format!("Playlist ({genres})"), &items)
            .map(|_| tool_envelope("success", json!({ "playlist": items }))),
    )
}

pub fn script_outline(topic: &str, duration_seconds: i64) -> Value {
    let outline = [
        format!("Hook: 1-2 lines to catch attention about {topic}"),
        format!("Body: 3 quick points with examples about {topic}"),
        "Call to action: 1 line".to_string(),
    ];
    tool_envelope(
        "success",
        json!({ "outline": outline, "topic": topic, "duration": duration_seconds }),
    )
}

pub fn schema() -> Value {
    json!({
        "name": AGENT_NAME,
        "description": "Generates captions, playlists, and short script outlines",
        "tools": [
            { "name": "generate_caption", "parameters": ["text", "tone?"] },
            { "name": "make_playlist", "parameters": ["genres", "length?"] },
            { "name": "script_outline", "parameters": ["topic", "duration_seconds?"] },
            { "name": "get_memory", "parameters": ["limit?"] }
        ]
    })
}
