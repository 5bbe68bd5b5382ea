//! The persisted representation of one hashed password.
//!
//! All four fields are set together at hash time and must travel
//! together: verification needs the exact `iterations` and `salt` that
//! were used originally, or the derived key will simply not match.
//! The `salt` field uses custom serde helpers so it serializes as a hex
//! string in JSON rather than a raw byte array.

use serde::{Deserialize, Serialize};

/// A salted, iterated password hash together with its cost parameters.
///
/// Immutable value object: constructed whole by
/// [`PasswordHasher::hash_password`](super::PasswordHasher::hash_password)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashRecord {
    /// PBKDF2 iteration count, drawn from `[8000, 15000)` at hash time.
    pub iterations: u32,

    /// Byte length of `salt`, drawn from `[64, 96)` at hash time.
    pub salt_size: u32,

    /// The random salt bytes.  Serialized as a hex string in JSON.
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub salt: Vec<u8>,

    /// Hex-encoded 64-byte PBKDF2-HMAC-SHA512 output (128 hex chars).
    pub hashed_password: String,
}

impl PasswordHashRecord {
    /// Build a record from its parts, deriving `salt_size` from the salt.
    pub(crate) fn new(iterations: u32, salt: Vec<u8>, hashed_password: String) -> Self {
        Self {
            iterations,
            salt_size: salt.len() as u32,
            salt,
            hashed_password,
        }
    }
}

pub(crate) fn hex_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(data))
}

pub(crate) fn hex_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_salt_as_hex() {
        let record = PasswordHashRecord::new(9_000, vec![0xDE, 0xAD, 0xBE, 0xEF], "abcd".into());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"deadbeef\""));

        let back: PasswordHashRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_deserialization_rejects_bad_hex() {
        let json = r#"{"iterations":9000,"salt_size":2,"salt":"zzzz","hashed_password":"ab"}"#;
        let result: std::result::Result<PasswordHashRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn salt_size_tracks_salt_length() {
        let record = PasswordHashRecord::new(8_000, vec![0u8; 64], String::new());
        assert_eq!(record.salt_size, 64);
        assert_eq!(record.salt.len(), 64);
    }
}
