//! Incremental byte-to-character decoding

use encoding_rs::{CoderResult, Decoder, Encoding};

/// Streaming decoder handing out one character at a time
///
/// Bytes may be fed in arbitrary pieces; sequences split across pieces are
/// reassembled by the underlying `encoding_rs` decoder. Malformed input
/// decodes to U+FFFD. A byte order mark is stripped only when it matches the
/// configured encoding.
pub(crate) struct TextDecoder {
    decoder: Decoder,
    decoded: String,
    cursor: usize,
    ended: bool,
}

impl std::fmt::Debug for TextDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDecoder")
            .field("encoding", &self.decoder.encoding().name())
            .field("buffered_bytes", &(self.decoded.len() - self.cursor))
            .field("ended", &self.ended)
            .finish()
    }
}

impl TextDecoder {
    pub(crate) fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_with_bom_removal(),
            decoded: String::new(),
            cursor: 0,
            ended: false,
        }
    }

    /// Take the next decoded character, if one is ready
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.decoded[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    /// Whether end of input was fed and every character handed out
    pub(crate) fn is_drained(&self) -> bool {
        self.ended && self.cursor == self.decoded.len()
    }

    /// Decode another piece of input
    ///
    /// An empty piece marks end of input and flushes any incomplete sequence.
    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        let last = bytes.is_empty();
        self.decoded.drain(..self.cursor);
        self.cursor = 0;

        let mut remaining = bytes;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(remaining.len())
                .unwrap_or(remaining.len().saturating_mul(3).saturating_add(16));
            self.decoded.reserve(needed);

            let (result, read, _) =
                self.decoder
                    .decode_to_string(remaining, &mut self.decoded, last);
            remaining = &remaining[read..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }

        if last {
            self.ended = true;
        }
    }
}
