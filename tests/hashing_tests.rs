//! Integration tests for the passcrypt hashing module.

use passcrypt::hashing::kdf::{ITERATION_RANGE, SALT_SIZE_RANGE};
use passcrypt::hashing::{
    derive_key_with_iterations, PasswordHashRecord, PasswordHasher, DERIVED_KEY_LEN,
};
use passcrypt::PasscryptError;
use sha2::{Digest, Sha512};

// ---------------------------------------------------------------------------
// Hash / verify round-trip
// ---------------------------------------------------------------------------

#[test]
fn hash_then_compare_succeeds() {
    let hasher = PasswordHasher::new();
    let record = hasher.hash_password("hunter2-but-longer").expect("hash");

    hasher
        .compare_passwords("hunter2-but-longer", &record)
        .expect("the original password must verify");
}

#[test]
fn compare_with_wrong_password_fails_with_mismatch() {
    let hasher = PasswordHasher::new();
    let record = hasher.hash_password("correct-password").expect("hash");

    let result = hasher.compare_passwords("wrong-password", &record);
    assert!(matches!(result, Err(PasscryptError::Mismatch)));
}

#[test]
fn record_parameters_fall_in_documented_ranges() {
    let hasher = PasswordHasher::new();
    let record = hasher.hash_password("range-check-password").expect("hash");

    assert!(ITERATION_RANGE.contains(&record.iterations));
    assert!(SALT_SIZE_RANGE.contains(&(record.salt_size as usize)));
    assert_eq!(record.salt.len(), record.salt_size as usize);
    // 64-byte derived key, hex-encoded.
    assert_eq!(record.hashed_password.len(), DERIVED_KEY_LEN * 2);
    assert!(record
        .hashed_password
        .chars()
        .all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hashing_same_password_twice_yields_different_records() {
    let hasher = PasswordHasher::new();
    let r1 = hasher.hash_password("same-password").expect("hash 1");
    let r2 = hasher.hash_password("same-password").expect("hash 2");

    // Fresh salt per call, so the stored hashes must differ.
    assert_ne!(r1.salt, r2.salt);
    assert_ne!(r1.hashed_password, r2.hashed_password);
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn hash_password_rejects_empty_input() {
    let hasher = PasswordHasher::new();
    assert!(matches!(
        hasher.hash_password(""),
        Err(PasscryptError::EmptyPassword)
    ));
}

#[test]
fn hash_password_rejects_whitespace_only_input() {
    let hasher = PasswordHasher::new();
    assert!(matches!(
        hasher.hash_password("   \t\n"),
        Err(PasscryptError::EmptyPassword)
    ));
}

#[test]
fn compare_rejects_record_with_blank_hash() {
    let hasher = PasswordHasher::new();
    let mut record = hasher.hash_password("valid-password").expect("hash");
    record.hashed_password = String::new();

    assert!(matches!(
        hasher.compare_passwords("valid-password", &record),
        Err(PasscryptError::EmptyStoredHash)
    ));
}

#[test]
fn compare_rejects_record_with_empty_salt() {
    let hasher = PasswordHasher::new();
    let mut record = hasher.hash_password("valid-password").expect("hash");
    record.salt.clear();

    assert!(matches!(
        hasher.compare_passwords("valid-password", &record),
        Err(PasscryptError::EmptySalt)
    ));
}

// ---------------------------------------------------------------------------
// Key derivation determinism
// ---------------------------------------------------------------------------

#[test]
fn derive_key_is_deterministic_across_calls() {
    let salt = [0x5Au8; 72];

    let k1 = derive_key_with_iterations("deterministic-pw", &salt, 9_500).expect("derive 1");
    let k2 = derive_key_with_iterations("deterministic-pw", &salt, 9_500).expect("derive 2");

    assert_eq!(k1, k2, "same inputs must produce the same key");
    assert_eq!(k1.len(), DERIVED_KEY_LEN);
}

#[test]
fn derive_key_changes_with_iteration_count() {
    let salt = [0x5Au8; 72];

    let k1 = derive_key_with_iterations("deterministic-pw", &salt, 9_500).expect("derive 1");
    let k2 = derive_key_with_iterations("deterministic-pw", &salt, 9_501).expect("derive 2");

    assert_ne!(k1, k2, "different iteration counts must change the key");
}

// ---------------------------------------------------------------------------
// Application-level pre-hash
// ---------------------------------------------------------------------------

#[test]
fn app_hash_without_global_salt_is_sha512() {
    let hasher = PasswordHasher::new();
    let app_hash = hasher
        .application_level_hash("some-password")
        .expect("app hash");

    let expected = hex::encode(Sha512::digest(b"some-password"));
    assert_eq!(app_hash, expected);
}

#[test]
fn global_salt_changes_the_stored_hash_chain() {
    let salted = PasswordHasher::with_global_salt("aa".repeat(32));
    let unsalted = PasswordHasher::new();

    let record = salted.hash_password("portable-password").expect("hash");

    // A hasher without the global salt recomputes a different pre-hash,
    // so verification must fail with a mismatch.
    assert!(matches!(
        unsalted.compare_passwords("portable-password", &record),
        Err(PasscryptError::Mismatch)
    ));

    // The originating hasher still verifies fine.
    salted
        .compare_passwords("portable-password", &record)
        .expect("verify with matching global salt");
}

#[test]
fn non_hex_global_salt_propagates_an_error() {
    // The pre-hash must fail loudly instead of silently falling back to
    // the plain-text password.
    let hasher = PasswordHasher::with_global_salt("not hex at all");
    assert!(matches!(
        hasher.hash_password("valid-password"),
        Err(PasscryptError::Hex(_))
    ));
}

// ---------------------------------------------------------------------------
// Record serialization
// ---------------------------------------------------------------------------

#[test]
fn record_json_roundtrip_preserves_all_fields() {
    let hasher = PasswordHasher::new();
    let record = hasher.hash_password("serialize-me-please").expect("hash");

    let json = serde_json::to_string(&record).expect("serialize");
    let back: PasswordHashRecord = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, record);

    // The restored record must still verify the original password.
    hasher
        .compare_passwords("serialize-me-please", &back)
        .expect("verify restored record");
}
