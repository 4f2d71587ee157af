//! Fixed-size sliding windows, the last-resort splitter.
//!
//! Used when a unit has no paragraph or sentence boundary left to
//! exploit. Windows are measured in **characters**, never bytes:
//! boundaries come from `char_indices()`, so slicing can never
//! land inside a multi-byte UTF-8 sequence.
//!
//! Adjacent windows share up to `overlap` characters. This is the
//! only place in the pipeline where content is duplicated.

/// Split `text` into windows of at most `max_chunk_size` characters.
///
/// Windows start every `max(1, max_chunk_size - overlap)` characters
/// while the start lies inside the text. Each window is trimmed and
/// windows that are blank after trimming are dropped.
///
/// `overlap >= max_chunk_size` is not rejected: the step clamps to
/// one character and the output degrades to heavily duplicated
/// windows.
///
/// # Example
///
/// ```
/// use semsplit::core::splitter::window::hard_split;
///
/// let windows = hard_split("0123456789ABCDEFGHIJ", 10, 2);
/// assert_eq!(windows, vec!["0123456789", "89ABCDEFGH", "GHIJ"]);
/// ```
pub fn hard_split(text: &str, max_chunk_size: usize, overlap: usize) -> Vec<String> {
    // (byte offset, char) pairs; all slicing goes through these
    let char_indices: Vec<(usize, char)> = text.char_indices().collect();

    if char_indices.is_empty() || max_chunk_size == 0 {
        return Vec::new();
    }

    let step = max_chunk_size.saturating_sub(overlap).max(1);

    (0..char_indices.len())
        .step_by(step)
        .filter_map(|char_start| {
            let char_end = (char_start + max_chunk_size).min(char_indices.len());
            let byte_start = char_indices[char_start].0;
            let byte_end = if char_end < char_indices.len() {
                char_indices[char_end].0
            } else {
                text.len()
            };

            let window = text[byte_start..byte_end].trim();
            (!window.is_empty()).then(|| window.to_string())
        })
        .collect()
}
