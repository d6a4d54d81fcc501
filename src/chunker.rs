//! Message text chunking.
//!
//! Splits arbitrary message text into fixed-size, whitespace-normalized
//! segments, the unit of embedding and retrieval. Cuts are hard character
//! counts with no sentence or word awareness.

/// Default maximum chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 450;

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into consecutive, non-overlapping segments of at most `size`
/// characters. The final segment may be shorter. Empty or whitespace-only
/// input yields no chunks. Deterministic: same input, same output.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let size = size.max(1);
    let chars: Vec<char> = normalized.chars().collect();
    chars
        .chunks(size)
        .map(|segment| segment.iter().collect())
        .collect()
}
