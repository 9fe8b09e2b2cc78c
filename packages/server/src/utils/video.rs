//! YouTube link resolution for embedded playback.
//!
//! Identifier extraction is substring-based and deliberately forgiving: the
//! extracted id is never validated, and a `youtu.be` link keeps any trailing
//! query parameters as part of the final path segment.

const EMBED_BASE: &str = "https://www.youtube.com/embed";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// Extract the video identifier from a YouTube URL, if the URL matches a
/// recognized shape (`watch?v=` or `youtu.be/`).
pub fn video_id(url: &str) -> Option<&str> {
    if let Some((_, rest)) = url.rsplit_once("watch?v=") {
        return rest.split('&').next();
    }
    if url.contains("youtu.be/") {
        return url.rsplit('/').next();
    }
    None
}

/// URL usable inside an inline player frame.
///
/// Unrecognized URLs pass through unchanged on the assumption that they are
/// already embeddable.
pub fn embed_url(url: &str) -> String {
    match video_id(url) {
        Some(id) => format!("{EMBED_BASE}/{id}"),
        None => url.to_string(),
    }
}

/// Derived thumbnail URL, or empty when no identifier can be extracted.
pub fn thumbnail_url(url: &str) -> String {
    match video_id(url) {
        Some(id) => format!("{THUMBNAIL_BASE}/{id}/hqdefault.jpg"),
        None => String::new(),
    }
}
