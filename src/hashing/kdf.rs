//! Password-based key derivation using PBKDF2-HMAC-SHA512.
//!
//! The derived key length is fixed at 64 bytes (512 bits) regardless of
//! password or salt size.  Hashing cost parameters are not fixed: every
//! hashed password gets its own iteration count and salt length, drawn
//! from the ranges below and stored alongside the hash so verification
//! can replay them exactly.

use std::ops::Range;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::{Rng, RngCore, TryRngCore};
use sha2::Sha512;

use crate::errors::{PasscryptError, Result};

/// Length of the derived key in bytes (512 bits, matching the PRF).
pub const DERIVED_KEY_LEN: usize = 64;

/// Iteration count used when the caller does not supply one.
pub const DEFAULT_ITERATIONS: u32 = 8_000;

/// Minimum UTF-8 byte length of a password fed into the KDF.
pub const MIN_PASSWORD_BYTES: usize = 8;

/// Maximum UTF-8 byte length of a password fed into the KDF.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Maximum salt length in bytes.
pub const MAX_SALT_LEN: usize = 96;

/// Range of per-password iteration counts (max exclusive).
pub const ITERATION_RANGE: Range<u32> = 8_000..15_000;

/// Range of per-password salt lengths in bytes (max exclusive).
pub const SALT_SIZE_RANGE: Range<usize> = 64..96;

/// Derive a 64-byte key using the default iteration count.
///
/// Prefer `derive_key_with_iterations` when replaying a stored record.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; DERIVED_KEY_LEN]> {
    derive_key_with_iterations(password, salt, DEFAULT_ITERATIONS)
}

/// Derive a 64-byte key with an explicit iteration count.
///
/// The same (password, salt, iterations) always produces the same key.
/// Inputs are validated before touching the primitive:
/// - password: non-empty, 8..=1024 UTF-8 bytes
/// - salt: non-empty, at most 96 bytes
/// - iterations: at least 1 (reported as a configuration error)
pub fn derive_key_with_iterations(
    password: &str,
    salt: &[u8],
    iterations: u32,
) -> Result<[u8; DERIVED_KEY_LEN]> {
    if password.is_empty() {
        return Err(PasscryptError::EmptyPassword);
    }
    let password_bytes = password.as_bytes();
    if password_bytes.len() < MIN_PASSWORD_BYTES {
        return Err(PasscryptError::PasswordTooShort {
            min: MIN_PASSWORD_BYTES,
            got: password_bytes.len(),
        });
    }
    if password_bytes.len() > MAX_PASSWORD_BYTES {
        return Err(PasscryptError::PasswordTooLong {
            max: MAX_PASSWORD_BYTES,
            got: password_bytes.len(),
        });
    }
    if salt.is_empty() {
        return Err(PasscryptError::EmptySalt);
    }
    if salt.len() > MAX_SALT_LEN {
        return Err(PasscryptError::SaltTooLong {
            max: MAX_SALT_LEN,
            got: salt.len(),
        });
    }
    if iterations == 0 {
        return Err(PasscryptError::CryptoPrimitive(
            "PBKDF2 iteration count must be at least 1".into(),
        ));
    }

    // HMAC-SHA512 accepts any key length, so the only failure mode left
    // is an invalid output length, which the fixed-size buffer rules out.
    let mut key = [0u8; DERIVED_KEY_LEN];
    pbkdf2::<Hmac<Sha512>>(password_bytes, salt, iterations, &mut key)
        .map_err(|e| PasscryptError::Unspecified(format!("PBKDF2 failed: {e}")))?;
    Ok(key)
}

/// Generate `len` cryptographically random salt bytes.
///
/// An OS entropy failure is not recoverable, so the infallible
/// `unwrap_err` adapter is used instead of threading a `Result` through
/// every caller.
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    rand::rngs::OsRng.unwrap_err().fill_bytes(&mut salt);
    salt
}

/// Pick a random iteration count in `[8000, 15000)`.
pub fn random_iterations() -> u32 {
    rand::rngs::OsRng.unwrap_err().random_range(ITERATION_RANGE)
}

/// Pick a random salt length in `[64, 96)`.
pub fn random_salt_size() -> usize {
    rand::rngs::OsRng.unwrap_err().random_range(SALT_SIZE_RANGE)
}
