//! Incremental UTF-8 decoding for streamed response bodies.
//!
//! Chunk boundaries on the wire are arbitrary, so a multi-byte character can
//! arrive split across two reads. The decoder carries the incomplete tail
//! forward and only emits complete characters.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

const REPLACEMENT: char = '\u{FFFD}';

/// Stateful decoder fed one byte chunk at a time.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` together with any held-over tail.
    ///
    /// Invalid sequences become U+FFFD. A trailing incomplete sequence is
    /// retained for the next call and not included in the returned text.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(error) => {
                    let valid = error.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match error.error_len() {
                        Some(invalid) => {
                            out.push(REPLACEMENT);
                            self.pending.drain(..valid + invalid);
                        }
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }

    /// Flush the held-over tail at end of stream.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
