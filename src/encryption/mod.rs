//! AES-CBC symmetric encryption with hex-encoded keys and payloads.
//!
//! This module provides:
//! - The cipher context and encrypt/decrypt operations (`cipher`)
//! - The `<hexIV>_<hexCipherText>` payload format (`payload`)

pub mod cipher;
pub mod payload;

// Re-export the most commonly used items so callers can write:
//   use passcrypt::encryption::{encrypt, decrypt, KeySize, ...};
pub use cipher::{decrypt, encrypt, is_encrypted, CipherContext, KeySize, BLOCK_SIZE};
pub use payload::EncryptedPayload;
