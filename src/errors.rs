use thiserror::Error;

/// All errors that can occur in passcrypt.
#[derive(Debug, Error)]
pub enum PasscryptError {
    // --- Password / salt validation errors ---
    #[error("Password must not be empty or whitespace-only")]
    EmptyPassword,

    #[error("Password must encode to at least {min} UTF-8 bytes, got {got}")]
    PasswordTooShort { min: usize, got: usize },

    #[error("Password must encode to at most {max} UTF-8 bytes, got {got}")]
    PasswordTooLong { max: usize, got: usize },

    #[error("Salt must not be empty")]
    EmptySalt,

    #[error("Salt must be at most {max} bytes, got {got}")]
    SaltTooLong { max: usize, got: usize },

    #[error("Stored hash must not be empty")]
    EmptyStoredHash,

    // --- Cipher input validation errors ---
    #[error("Plaintext must not be empty")]
    EmptyPlaintext,

    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Cipher payload must not be empty")]
    EmptyCiphertext,

    #[error("Unsupported AES key size: {0} bits (expected 128, 192 or 256)")]
    InvalidKeySize(u32),

    #[error("Key must decode to {expected} bytes for this key size, got {got}")]
    KeyLengthMismatch { expected: usize, got: usize },

    #[error("Invalid cipher payload: {0}")]
    InvalidPayload(String),

    // --- Format errors ---
    #[error("Malformed hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    // --- Primitive / comparison / decode errors ---
    #[error("Crypto primitive rejected its parameters: {0}")]
    CryptoPrimitive(String),

    #[error("Passwords did not match")]
    Mismatch,

    #[error("Decrypted data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Unspecified error: {0}")]
    Unspecified(String),
}

/// Convenience type alias for passcrypt results.
pub type Result<T> = std::result::Result<T, PasscryptError>;
