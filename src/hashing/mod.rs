//! Password hashing with PBKDF2-HMAC-SHA512.
//!
//! This module provides:
//! - Key derivation and random cost-parameter selection (`kdf`)
//! - The persisted hash record (`record`)
//! - The hashing/verification service (`hasher`)

pub mod hasher;
pub mod kdf;
pub mod record;

// Re-export the most commonly used items so callers can write:
//   use passcrypt::hashing::{PasswordHasher, PasswordHashRecord, ...};
pub use hasher::PasswordHasher;
pub use kdf::{
    derive_key, derive_key_with_iterations, generate_salt, DEFAULT_ITERATIONS, DERIVED_KEY_LEN,
};
pub use record::PasswordHashRecord;
