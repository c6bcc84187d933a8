//! Character set conversion for fixed-width strings in stored files.
//!
//! Setup files predate Unicode and store names and friendly codes in a
//! single-byte legacy encoding. The loader is parameterized with a
//! [`Charset`] so callers can pick the encoding of their files.

/// Conversion between stored bytes and strings.
pub trait Charset: Send + Sync {
    /// Decode stored bytes into a string.
    fn decode(&self, bytes: &[u8]) -> String;

    /// Encode a string into stored bytes.
    fn encode(&self, text: &str) -> Vec<u8>;
}

/// ISO 8859-1: every byte maps to the code point of the same value.
///
/// Characters outside U+0000..U+00FF encode as `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Charset;

impl Charset for Latin1Charset {
    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| char::from(b)).collect()
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect()
    }
}

/// UTF-8 passthrough. Invalid sequences decode as U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Charset;

impl Charset for Utf8Charset {
    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

/// Encode `text` into exactly `width` bytes, space padded or truncated.
///
/// Truncation drops whole characters, so a multi-byte encoding never ends
/// in a partial sequence.
pub(crate) fn encode_fixed(charset: &dyn Charset, text: &str, width: usize) -> Vec<u8> {
    let mut text = text;
    let mut bytes = charset.encode(text);
    while bytes.len() > width {
        let end = text.char_indices().next_back().map_or(0, |(i, _)| i);
        text = &text[..end];
        bytes = charset.encode(text);
    }
    bytes.resize(width, b' ');
    bytes
}

/// Decode a fixed-width field, stripping trailing spaces and NULs.
pub(crate) fn decode_fixed(charset: &dyn Charset, bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |p| p + 1);
    charset.decode(&bytes[..end])
}
