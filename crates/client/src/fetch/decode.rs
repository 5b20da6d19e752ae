//! Incremental, lossy UTF-8 decoding for streamed response bodies.

use std::char::REPLACEMENT_CHARACTER;

/// Chunk-by-chunk UTF-8 decoder.
///
/// Multi-byte sequences split across chunk boundaries are carried over to the
/// next call. Invalid sequences become U+FFFD instead of failing.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk` and append the text to `out`.
    pub fn decode(&mut self, chunk: &[u8], out: &mut String) {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let mut rest: &[u8] = &buf;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // incomplete sequence at the end of the chunk
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
    }

    /// Flush at end of stream. A dangling partial sequence becomes one U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(REPLACEMENT_CHARACTER);
        }
    }

    /// Drop any partial sequence without emitting anything.
    pub fn discard(&mut self) {
        self.pending.clear();
    }
}

/// Truncate `text` to at most `max_chars` characters.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}
