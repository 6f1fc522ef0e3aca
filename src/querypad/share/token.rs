//! The opaque text ↔ token pair: DEFLATE then URL-safe base64, no padding.
//!
//! Tokens are meant to travel through chat messages and issue trackers, so
//! the alphabet avoids `/`, `+`, and `=` entirely.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("corrupt payload: {0}")]
    Payload(#[from] std::io::Error),
}

/// Compress and encode `text` into a share token.
pub fn encode(text: &str) -> Result<String, TokenError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(URL_SAFE_NO_PAD.encode(encoder.finish()?))
}

/// Decode a share token back into the exact text it was made from.
/// Fails on anything that is not a token this module produced.
pub fn decode(token: &str) -> Result<String, TokenError> {
    let compressed = URL_SAFE_NO_PAD.decode(token)?;
    let mut text = String::new();
    ZlibDecoder::new(compressed.as_slice()).read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_text() {
        for text in [
            "",
            "(identifier) @name",
            "multi\nline\nquery",
            "unicode: ∀x (λ)",
        ] {
            assert_eq!(decode(&encode(text).unwrap()).unwrap(), text);
        }
    }

    #[test]
    fn tokens_are_url_safe() {
        let token = encode(&"(call (arguments (string)))\n".repeat(50)).unwrap();
        assert!(!token.contains(['+', '/', '=']));
    }

    #[test]
    fn same_text_gives_the_same_token() {
        let a = encode("(comment)").unwrap();
        let b = encode("(comment)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(decode("not!!valid!!base64").is_err());
        // Valid base64, but not a deflate stream.
        assert!(decode("aGVsbG8").is_err());
    }
}
