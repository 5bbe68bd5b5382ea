//! The textual payload format produced by encryption.
//!
//! A payload is a single string of the form:
//!
//! ```text
//! <hex IV>_<hex ciphertext>
//! ```
//!
//! - Exactly one `_` separator.
//! - Both segments must be valid even-length hex.
//! - The decoded IV must be exactly one AES block (16 bytes) regardless
//!   of key size.
//!
//! Parsing is strict so `decrypt` never feeds malformed data to the
//! cipher: a bad separator count, odd-length hex, or a wrong-sized IV
//! all fail here with a descriptive error.

use super::cipher::BLOCK_SIZE;
use crate::errors::{PasscryptError, Result};

/// Separator between the IV and ciphertext segments.
const SEPARATOR: char = '_';

/// A decoded `<hexIV>_<hexCipherText>` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// The 16-byte initialization vector.
    pub iv: [u8; BLOCK_SIZE],
    /// The raw ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    pub fn new(iv: [u8; BLOCK_SIZE], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Render the payload as `<hexIV>_<hexCipherText>`.
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            hex::encode(self.iv),
            SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }

    /// Parse and validate a payload string.
    pub fn parse(text: &str) -> Result<Self> {
        let segments: Vec<&str> = text.split(SEPARATOR).collect();
        if segments.len() != 2 {
            return Err(PasscryptError::InvalidPayload(format!(
                "expected exactly one '{}' separator, found {}",
                SEPARATOR,
                segments.len().saturating_sub(1)
            )));
        }

        let iv_bytes = hex::decode(segments[0])?;
        let ciphertext = hex::decode(segments[1])?;

        if iv_bytes.len() != BLOCK_SIZE {
            return Err(PasscryptError::InvalidPayload(format!(
                "IV must be {} bytes, got {}",
                BLOCK_SIZE,
                iv_bytes.len()
            )));
        }
        if ciphertext.is_empty() {
            return Err(PasscryptError::InvalidPayload(
                "ciphertext segment is empty".into(),
            ));
        }

        let mut iv = [0u8; BLOCK_SIZE];
        iv.copy_from_slice(&iv_bytes);
        Ok(Self { iv, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_parse_roundtrip() {
        let payload = EncryptedPayload::new([0xAB; BLOCK_SIZE], vec![1, 2, 3, 4]);
        let text = payload.encode();
        assert_eq!(text, format!("{}_{}", "ab".repeat(BLOCK_SIZE), "01020304"));
        assert_eq!(EncryptedPayload::parse(&text).unwrap(), payload);
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let result = EncryptedPayload::parse("deadbeef");
        assert!(matches!(result, Err(PasscryptError::InvalidPayload(_))));
    }

    #[test]
    fn parse_rejects_extra_separators() {
        let result = EncryptedPayload::parse("aa_bb_cc");
        assert!(matches!(result, Err(PasscryptError::InvalidPayload(_))));
    }

    #[test]
    fn parse_rejects_odd_length_hex() {
        let iv = "00".repeat(BLOCK_SIZE);
        let result = EncryptedPayload::parse(&format!("{iv}_abc"));
        assert!(matches!(result, Err(PasscryptError::Hex(_))));
    }

    #[test]
    fn parse_rejects_non_hex_digits() {
        let iv = "00".repeat(BLOCK_SIZE);
        let result = EncryptedPayload::parse(&format!("{iv}_zzzz"));
        assert!(matches!(result, Err(PasscryptError::Hex(_))));
    }

    #[test]
    fn parse_rejects_wrong_iv_length() {
        let result = EncryptedPayload::parse("aabb_00112233445566778899aabbccddeeff");
        assert!(matches!(result, Err(PasscryptError::InvalidPayload(_))));
    }
}
