//! InnerTube renderer → loosely-typed record conversion.
//!
//! Responses are deeply nested renderer trees whose exact paths shift between
//! client versions, so items are located by key search instead of fixed
//! paths. Records keep the upstream's field names and text formats
//! (`"3:45"` durations, `"25 songs"` counts) rather than cleaning them up:
//! record shapes differ between endpoints, and normalizing them is the
//! caller's job.

use serde_json::{Map, Value, json};

const LIST_ITEM: &str = "musicResponsiveListItemRenderer";
const TWO_ROW_ITEM: &str = "musicTwoRowItemRenderer";

// Type labels that lead the subtitle line of unfiltered results.
const TYPE_LABELS: &[&str] = &[
    "Song", "Video", "Playlist", "Album", "Single", "EP", "Episode", "Artist",
];

/// First value stored under `key` anywhere in `value` (depth-first).
pub(crate) fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|v| find_first(v, key))),
        Value::Array(arr) => arr.iter().find_map(|v| find_first(v, key)),
        _ => None,
    }
}

/// Every value stored under `key` in `value`, outermost first. Does not
/// descend into matches.
pub(crate) fn find_all<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    fn walk<'a>(value: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
        match value {
            Value::Object(map) => {
                if let Some(hit) = map.get(key) {
                    out.push(hit);
                    return;
                }
                for v in map.values() {
                    walk(v, key, out);
                }
            }
            Value::Array(arr) => arr.iter().for_each(|v| walk(v, key, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, key, &mut out);
    out
}

/// The `runs` array of a text object, or an empty slice.
pub(crate) fn runs(text: &Value) -> &[Value] {
    text["runs"].as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Flatten a text object (`simpleText` or `runs`) into a string.
pub(crate) fn text(value: &Value) -> Option<String> {
    if let Some(s) = value["simpleText"].as_str() {
        return Some(s.to_owned());
    }
    let joined: String = runs(value)
        .iter()
        .filter_map(|r| r["text"].as_str())
        .collect();
    (!joined.is_empty()).then_some(joined)
}

/// Thumbnail list (`[{url, width, height}]`) anywhere below `renderer`.
pub(crate) fn thumbnails(renderer: &Value) -> Value {
    find_first(renderer, "thumbnails")
        .filter(|t| t.is_array())
        .cloned()
        .unwrap_or_else(|| json!([]))
}

fn page_type(run: &Value) -> Option<&str> {
    run["navigationEndpoint"]["browseEndpoint"]["browseEndpointContextSupportedConfigs"]
        ["browseEndpointContextMusicConfig"]["pageType"]
        .as_str()
}

fn browse_id(run: &Value) -> Option<&str> {
    run["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str()
}

fn is_separator(s: &str) -> bool {
    matches!(s.trim(), "•" | "&" | "," | "")
}

/// `3:45` / `1:02:03`.
/// `"25 songs"`, `"1,234 tracks"`, `"1.2K views"`: the first word is a number.
fn looks_like_count(s: &str) -> bool {
    let Some(word) = s.split_whitespace().next() else {
        return false;
    };
    let digits = word.strip_suffix(['K', 'M']).unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

pub(crate) fn looks_like_duration(s: &str) -> bool {
    s.contains(':') && s.chars().all(|c| c.is_ascii_digit() || c == ':')
}

fn flex_column(renderer: &Value, index: usize) -> &Value {
    &renderer["flexColumns"][index]["musicResponsiveListItemFlexColumnRenderer"]["text"]
}

/// Convert every list-item renderer below `root` into a track record.
pub(crate) fn track_items(root: &Value) -> Vec<Value> {
    find_all(root, LIST_ITEM)
        .into_iter()
        .filter_map(parse_track_item)
        .collect()
}

/// Convert every list-item renderer below `root` into a playlist record.
pub(crate) fn playlist_list_items(root: &Value) -> Vec<Value> {
    find_all(root, LIST_ITEM)
        .into_iter()
        .filter_map(parse_playlist_list_item)
        .collect()
}

/// Convert every grid tile below `root` into a playlist record.
pub(crate) fn playlist_tiles(root: &Value) -> Vec<Value> {
    find_all(root, TWO_ROW_ITEM)
        .into_iter()
        .filter_map(parse_playlist_tile)
        .collect()
}

/// Song / video row.
///
/// Output: `{ videoId, title, artists: [{name, id}], album?, duration?, thumbnails }`.
fn parse_track_item(renderer: &Value) -> Option<Value> {
    let title_col = flex_column(renderer, 0);
    let first_run = runs(title_col).first()?;

    let video_id = renderer["playlistItemData"]["videoId"]
        .as_str()
        .or_else(|| first_run["navigationEndpoint"]["watchEndpoint"]["videoId"].as_str())
        .or_else(|| find_first(&renderer["overlay"], "videoId").and_then(Value::as_str));

    let mut record = Map::new();
    if let Some(id) = video_id {
        record.insert("videoId".into(), id.into());
    }
    if let Some(title) = first_run["text"].as_str() {
        record.insert("title".into(), title.into());
    }

    let mut artists = Vec::new();
    let mut duration = None;
    for (i, run) in runs(flex_column(renderer, 1)).iter().enumerate() {
        let Some(t) = run["text"].as_str() else { continue };
        if is_separator(t) {
            continue;
        }
        match page_type(run) {
            Some("MUSIC_PAGE_TYPE_ARTIST" | "MUSIC_PAGE_TYPE_USER_CHANNEL") => {
                artists.push(json!({ "name": t, "id": browse_id(run) }));
            }
            Some("MUSIC_PAGE_TYPE_ALBUM") => {
                record.insert("album".into(), json!({ "name": t, "id": browse_id(run) }));
            }
            _ if looks_like_duration(t) => duration = Some(t.to_owned()),
            _ if i == 0 && TYPE_LABELS.contains(&t) => {}
            // unlinked artist name, e.g. on uploads
            _ if artists.is_empty() && !t.ends_with("views") && !t.ends_with("plays") => {
                artists.push(json!({ "name": t, "id": null }));
            }
            _ => {}
        }
    }

    let fixed = &renderer["fixedColumns"][0]["musicResponsiveListItemFixedColumnRenderer"]["text"];
    if let Some(t) = text(fixed).filter(|t| looks_like_duration(t)) {
        duration = Some(t);
    }

    record.insert("artists".into(), Value::Array(artists));
    if let Some(d) = duration {
        record.insert("duration".into(), d.into());
    }
    record.insert("thumbnails".into(), thumbnails(renderer));
    Some(Value::Object(record))
}

/// Playlist row from search results.
///
/// Output: `{ resultType: "playlist", browseId, title, author, itemCount?, thumbnails }`
/// where `author` is a plain string.
fn parse_playlist_list_item(renderer: &Value) -> Option<Value> {
    let browse = renderer["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str()?;
    let title = runs(flex_column(renderer, 0)).first()?["text"].as_str()?;

    let parts: Vec<&str> = runs(flex_column(renderer, 1))
        .iter()
        .filter_map(|r| r["text"].as_str())
        .filter(|t| !is_separator(t) && *t != "Playlist")
        .collect();

    let mut record = json!({
        "resultType": "playlist",
        "browseId": browse,
        "title": title,
        "author": parts.first().copied().unwrap_or_default(),
        "thumbnails": thumbnails(renderer),
    });
    if let Some(count) = parts.iter().skip(1).find(|p| looks_like_count(p)) {
        record["itemCount"] = (*count).into();
    }
    Some(record)
}

/// Grid tile from the library page.
///
/// Output: `{ playlistId, title, description, author: [{name, id}], count?, thumbnails }`.
/// Tiles without a browse target (the "New playlist" button) are skipped.
fn parse_playlist_tile(renderer: &Value) -> Option<Value> {
    let browse = renderer["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str()?;
    let playlist_id = browse.strip_prefix("VL").unwrap_or(browse);
    let title = text(&renderer["title"]).unwrap_or_default();

    let subtitle = &renderer["subtitle"];
    let authors: Vec<Value> = runs(subtitle)
        .iter()
        .filter(|r| browse_id(r).is_some())
        .filter_map(|r| {
            let name = r["text"].as_str()?;
            Some(json!({ "name": name, "id": browse_id(r) }))
        })
        .collect();

    let mut record = json!({
        "playlistId": playlist_id,
        "title": title,
        "description": text(subtitle).unwrap_or_default(),
        "author": authors,
        "thumbnails": thumbnails(renderer),
    });
    let count = runs(subtitle)
        .iter()
        .filter(|r| browse_id(r).is_none())
        .filter_map(|r| r["text"].as_str())
        .rfind(|t| looks_like_count(t));
    if let Some(count) = count {
        record["count"] = count.into();
    }
    Some(record)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    fn artist_run(name: &str, id: &str) -> Value {
        json!({
            "text": name,
            "navigationEndpoint": { "browseEndpoint": {
                "browseId": id,
                "browseEndpointContextSupportedConfigs": {
                    "browseEndpointContextMusicConfig": { "pageType": "MUSIC_PAGE_TYPE_ARTIST" }
                }
            }}
        })
    }

    /// A song row as returned by filtered search.
    pub(crate) fn song_row(video_id: &str, title: &str, artist: &str, duration: &str) -> Value {
        json!({ "musicResponsiveListItemRenderer": {
            "thumbnail": { "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [
                { "url": "https://i.ytimg.com/small.jpg", "width": 60, "height": 60 },
                { "url": "https://i.ytimg.com/large.jpg", "width": 120, "height": 120 }
            ]}}},
            "flexColumns": [
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [{
                    "text": title,
                    "navigationEndpoint": { "watchEndpoint": { "videoId": video_id } }
                }]}}},
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                    artist_run(artist, "UCartist"),
                    { "text": " • " },
                    { "text": duration }
                ]}}}
            ]
        }})
    }

    /// A playlist row as stored on a playlist page (duration in a fixed column).
    pub(crate) fn playlist_row(video_id: &str, title: &str, duration: &str) -> Value {
        json!({ "musicResponsiveListItemRenderer": {
            "playlistItemData": { "videoId": video_id },
            "flexColumns": [
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [{ "text": title }]}}},
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                    artist_run("A", "UCa"), { "text": " & " }, artist_run("B", "UCb")
                ]}}}
            ],
            "fixedColumns": [
                { "musicResponsiveListItemFixedColumnRenderer": { "text": { "runs": [{ "text": duration }]}}}
            ]
        }})
    }

    /// A library grid tile.
    pub(crate) fn playlist_tile(browse_id: &str, title: &str, count: &str) -> Value {
        json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": title }] },
            "navigationEndpoint": { "browseEndpoint": { "browseId": browse_id } },
            "subtitle": { "runs": [
                { "text": "Playlist" }, { "text": " • " },
                { "text": "Me", "navigationEndpoint": { "browseEndpoint": { "browseId": "UCme" } } },
                { "text": " • " }, { "text": count }
            ]},
            "thumbnailRenderer": { "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [
                { "url": "https://i.ytimg.com/pl.jpg" }
            ]}}}
        }})
    }
}
