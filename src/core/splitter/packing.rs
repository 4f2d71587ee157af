//! Greedy bin-packing shared by the paragraph and sentence splitters.
//!
//! Units are folded into a buffer by value: each step takes the
//! current state and returns the next one, so there is no shared
//! mutable accumulator outside the fold.

use super::char_len;

#[derive(Debug, Default)]
struct Packed {
    pieces: Vec<String>,
    buffer: String,
    buffer_len: usize,
}

impl Packed {
    fn flush(mut self) -> Self {
        if !self.buffer.is_empty() {
            self.pieces.push(std::mem::take(&mut self.buffer));
            self.buffer_len = 0;
        }
        self
    }

    fn fits(&self, unit_len: usize, separator_len: usize, max_chunk_size: usize) -> bool {
        if self.buffer.is_empty() {
            unit_len <= max_chunk_size
        } else {
            self.buffer_len + separator_len + unit_len <= max_chunk_size
        }
    }

    fn append(mut self, unit: &str, unit_len: usize, separator: &str, separator_len: usize) -> Self {
        if !self.buffer.is_empty() {
            self.buffer.push_str(separator);
            self.buffer_len += separator_len;
        }
        self.buffer.push_str(unit);
        self.buffer_len += unit_len;
        self
    }

    fn extend(mut self, pieces: Vec<String>) -> Self {
        self.pieces.extend(pieces);
        self
    }

    fn finish(self) -> Vec<String> {
        self.flush().pieces
    }
}

/// Pack trimmed, non-empty `units` into pieces of at most `max_chunk_size` chars.
///
/// A unit that is too large on its own is never buffered: the buffer
/// is flushed, `oversized` produces replacement pieces for it, and
/// packing resumes with an empty buffer.
pub(crate) fn pack<'a, I, F>(
    units: I,
    max_chunk_size: usize,
    separator: &str,
    mut oversized: F,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str) -> Vec<String>,
{
    let separator_len = char_len(separator);

    units
        .into_iter()
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .fold(Packed::default(), |packed, unit| {
            let unit_len = char_len(unit);
            if unit_len > max_chunk_size {
                packed.flush().extend(oversized(unit))
            } else if packed.fits(unit_len, separator_len, max_chunk_size) {
                packed.append(unit, unit_len, separator, separator_len)
            } else {
                packed
                    .flush()
                    .append(unit, unit_len, separator, separator_len)
            }
        })
        .finish()
}
