//! Upstream record → bridge schema.
//!
//! Upstream records disagree on field names and types from one endpoint to
//! the next. Everything here is total: a missing or malformed field falls
//! back to a default, and only records without any usable id are dropped.

use serde::Serialize;
use serde_json::Value;

/// Duration reported when none can be parsed.
pub const DEFAULT_DURATION: u32 = 180;
const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";

/// A track in the bridge's output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeTrack {
    pub id: String,
    pub title: String,
    /// Artist names joined with `", "`.
    pub artist: String,
    /// Seconds.
    pub duration: u32,
    /// Largest thumbnail URL, or empty.
    pub thumbnail: String,
}

/// A playlist in the bridge's output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgePlaylist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub track_count: u64,
    pub author: String,
    pub thumbnail: String,
}

pub fn normalize_tracks(records: &[Value]) -> Vec<BridgeTrack> {
    records.iter().filter_map(normalize_track).collect()
}

pub fn normalize_playlists(records: &[Value]) -> Vec<BridgePlaylist> {
    records.iter().filter_map(normalize_playlist).collect()
}

/// Normalize one track record. Returns `None` when it has no video id.
pub fn normalize_track(record: &Value) -> Option<BridgeTrack> {
    let Some(id) = first_str(record, &["videoId", "id"]) else {
        tracing::warn!("dropping track without video id");
        return None;
    };

    let title = first_str(record, &["title"]).unwrap_or(UNKNOWN_TITLE);

    let artist_names = if record["artists"].as_array().is_some_and(|a| !a.is_empty()) {
        names(&record["artists"])
    } else {
        names(&record["artist"])
    };
    let artist = if artist_names.is_empty() {
        UNKNOWN_ARTIST.to_owned()
    } else {
        artist_names.join(", ")
    };

    Some(BridgeTrack {
        id: id.to_owned(),
        title: title.to_owned(),
        artist,
        duration: parse_duration(record),
        thumbnail: thumbnail(record),
    })
}

/// Normalize one playlist record. Returns `None` when it has no id.
pub fn normalize_playlist(record: &Value) -> Option<BridgePlaylist> {
    let id = first_str(record, &["playlistId"])
        .or_else(|| {
            first_str(record, &["browseId"]).map(|b| b.strip_prefix("VL").unwrap_or(b))
        })
        .or_else(|| first_str(record, &["id"]));
    let Some(id) = id else {
        tracing::warn!("dropping playlist without id");
        return None;
    };

    Some(BridgePlaylist {
        id: id.to_owned(),
        title: first_str(record, &["title"])
            .unwrap_or(UNKNOWN_PLAYLIST)
            .to_owned(),
        description: record["description"].as_str().unwrap_or_default().to_owned(),
        track_count: ["count", "trackCount", "itemCount"]
            .iter()
            .find_map(|key| parse_count(&record[*key]))
            .unwrap_or(0),
        author: names(&record["author"]).join(", "),
        thumbnail: thumbnail(record),
    })
}

/// Track duration in seconds.
///
/// Tries `duration_seconds`, then `duration`, then `lengthText`, taking the
/// first that yields a positive value. Falls back to [`DEFAULT_DURATION`].
pub fn parse_duration(record: &Value) -> u32 {
    ["duration_seconds", "duration", "lengthText"]
        .iter()
        .find_map(|key| duration_value(&record[*key]).filter(|secs| *secs > 0))
        .unwrap_or(DEFAULT_DURATION)
}

fn duration_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(rounded))
            .and_then(|secs| u32::try_from(secs).ok()),
        Value::String(s) => parse_duration_str(s),
        // `{"runs": [{"text": "3:45"}]}` / `{"simpleText": "3:45"}`
        Value::Object(_) => value["simpleText"]
            .as_str()
            .or_else(|| value["runs"][0]["text"].as_str())
            .and_then(parse_duration_str),
        _ => None,
    }
}

/// Parse `"SS"`, `"MM:SS"` or `"HH:MM:SS"` into seconds.
///
/// Characters other than digits and `:` are ignored, so `"3:45 min"` parses.
pub fn parse_duration_str(s: &str) -> Option<u32> {
    let clean: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    if clean.is_empty() {
        return None;
    }

    let parts = clean
        .split(':')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match parts.as_slice() {
        [s] => Some(*s),
        [m, s] => m.checked_mul(60)?.checked_add(*s),
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s),
        _ => None,
    }
}

/// Integer count from a number or from the first word of a string:
/// `"1,234 songs"`, `"1.2K songs"`, `"3M"`.
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let word = s.split_whitespace().next()?.replace(',', "");
            let (number, scale) = if let Some(n) = word.strip_suffix(['K', 'k']) {
                (n, 1e3)
            } else if let Some(n) = word.strip_suffix('M') {
                (n, 1e6)
            } else {
                let digits: String = word.chars().filter(char::is_ascii_digit).collect();
                return digits.parse().ok();
            };
            number.parse::<f64>().ok().and_then(|n| rounded(n * scale))
        }
        _ => None,
    }
}

/// Round to a whole number, rejecting negatives, NaN and anything past `u64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded(f: f64) -> Option<u64> {
    const LIMIT: f64 = 18_446_744_073_709_551_616.0; // 2^64
    let r = f.round();
    (0.0..LIMIT).contains(&r).then(|| r as u64)
}

/// Names from a string, an object with `name`, or a list of either.
/// Empty names are dropped.
fn names(value: &Value) -> Vec<String> {
    let name_of = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => v["name"].as_str().map(str::to_owned),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    };
    let all: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(name_of).collect(),
        other => name_of(other).into_iter().collect(),
    };
    all.into_iter()
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Last (largest) thumbnail URL, else a `thumbnail` string, else empty.
fn thumbnail(record: &Value) -> String {
    record["thumbnails"]
        .as_array()
        .and_then(|thumbs| thumbs.iter().rev().find_map(|t| t["url"].as_str()))
        .or_else(|| record["thumbnail"].as_str())
        .unwrap_or_default()
        .to_owned()
}

/// First non-empty string among `keys`.
fn first_str<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| record[*key].as_str().filter(|s| !s.trim().is_empty()))
}
