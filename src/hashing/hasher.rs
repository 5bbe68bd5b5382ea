//! The password hashing service.
//!
//! `PasswordHasher` turns a plain-text password into a verifiable,
//! salted, iterated hash and checks candidates against stored records.
//! Its only state is an optional global application salt fixed at
//! construction, so a single instance is safe to share across threads.
//!
//! Before the per-password PBKDF2 run, every password goes through an
//! application-level pre-hash: plain SHA-512 by default, or PBKDF2 with
//! the global salt at a fixed iteration count when one is configured.

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::kdf::{derive_key_with_iterations, generate_salt, random_iterations, random_salt_size};
use super::record::PasswordHashRecord;
use crate::errors::{PasscryptError, Result};

/// Iteration count for the global-salt pre-hash.  Deliberately below the
/// per-password range: the pre-hash is a keyed strengthening step, not
/// the main cost factor.
const APP_HASH_ITERATIONS: u32 = 6_000;

/// Derives and verifies password hashes.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    /// Hex-encoded application-wide salt, fixed at construction.
    global_salt: Option<String>,
}

impl PasswordHasher {
    /// A hasher without an application-level salt.  The pre-hash is a
    /// plain SHA-512 digest.
    pub fn new() -> Self {
        Self { global_salt: None }
    }

    /// A hasher with a hex-encoded application-wide salt.  The pre-hash
    /// becomes PBKDF2 keyed by that salt, so records from this hasher
    /// can only be verified by a hasher configured with the same salt.
    pub fn with_global_salt(hex_salt: impl Into<String>) -> Self {
        Self {
            global_salt: Some(hex_salt.into()),
        }
    }

    /// Hash a password with freshly randomized cost parameters.
    ///
    /// Picks an iteration count in `[8000, 15000)` and a salt length in
    /// `[64, 96)`, generates the salt from the OS CSPRNG, and returns
    /// the fully populated record.  Fails on empty or whitespace-only
    /// passwords and propagates any derivation failure.
    pub fn hash_password(&self, password: &str) -> Result<PasswordHashRecord> {
        if password.trim().is_empty() {
            return Err(PasscryptError::EmptyPassword);
        }

        let iterations = random_iterations();
        let salt = generate_salt(random_salt_size());

        let app_hash = self.application_level_hash(password)?;
        let mut derived = derive_key_with_iterations(&app_hash, &salt, iterations)?;
        let hashed_password = hex::encode(derived);
        derived.zeroize();

        Ok(PasswordHashRecord::new(iterations, salt, hashed_password))
    }

    /// Verify a candidate password against a stored record.
    ///
    /// Recomputes the derivation with the record's exact salt and
    /// iteration count and compares the hex digests in constant time.
    /// Returns `Err(Mismatch)` when the password is wrong.
    pub fn compare_passwords(&self, password: &str, record: &PasswordHashRecord) -> Result<()> {
        if password.trim().is_empty() {
            return Err(PasscryptError::EmptyPassword);
        }
        if record.hashed_password.trim().is_empty() {
            return Err(PasscryptError::EmptyStoredHash);
        }
        if record.salt.is_empty() {
            return Err(PasscryptError::EmptySalt);
        }

        let app_hash = self.application_level_hash(password)?;
        let mut derived = derive_key_with_iterations(&app_hash, &record.salt, record.iterations)?;
        let candidate = hex::encode(derived);
        derived.zeroize();

        if candidate
            .as_bytes()
            .ct_eq(record.hashed_password.as_bytes())
            .into()
        {
            Ok(())
        } else {
            Err(PasscryptError::Mismatch)
        }
    }

    /// Apply the application-level pre-hash to a password.
    ///
    /// Without a global salt this is the hex SHA-512 digest of the UTF-8
    /// password bytes.  With one, it is the hex PBKDF2-HMAC-SHA512 of
    /// the password keyed by the decoded salt at a fixed 6000 rounds.
    ///
    /// Any failure (a non-hex global salt, a password outside the KDF
    /// bounds) is propagated rather than silently skipping the pre-hash,
    /// so a misconfigured salt can never weaken the hash chain unnoticed.
    pub fn application_level_hash(&self, password: &str) -> Result<String> {
        match &self.global_salt {
            None => Ok(hex::encode(Sha512::digest(password.as_bytes()))),
            Some(hex_salt) => {
                let salt = hex::decode(hex_salt)?;
                let mut derived = derive_key_with_iterations(password, &salt, APP_HASH_ITERATIONS)?;
                let encoded = hex::encode(derived);
                derived.zeroize();
                Ok(encoded)
            }
        }
    }
}
