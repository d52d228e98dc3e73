//! Tolerant text decoding.
//!
//! Some devices write the occasional byte that is not valid UTF-8 (typically a
//! Latin-1 `µ` or `²` in a unit header). Those bytes must not stop the load.

use encoding_rs::{DecoderResult, UTF_8};

/// What to do with byte sequences that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Drop undecodable bytes.
    #[default]
    Ignore,
    /// Keep a U+FFFD replacement character in their place.
    Replace,
}

/// Decoded file contents.
#[derive(Debug, Clone)]
pub struct DecodedText {
    /// Text with any byte-order mark removed.
    pub text: String,
    /// Number of malformed sequences that were dropped or replaced.
    pub malformed: usize,
}

/// Decode raw file bytes as UTF-8 without failing.
///
/// Only sequences the decoder rejects are dropped or replaced; a U+FFFD that
/// was already encoded in the file is kept as text.
pub fn decode_bytes(bytes: &[u8], policy: DecodePolicy) -> DecodedText {
    let mut decoder = UTF_8.new_decoder_with_bom_removal();
    let mut text = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut malformed = 0usize;
    let mut input = bytes;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut text, true);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => {
                malformed += 1;
                if policy == DecodePolicy::Replace {
                    text.push('\u{FFFD}');
                }
            }
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(input.len())
                    .unwrap_or(input.len());
                text.reserve(needed.max(4));
            }
        }
    }
    DecodedText { text, malformed }
}
