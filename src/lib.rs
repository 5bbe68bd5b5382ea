//! Password hashing and symmetric encryption helpers.
//!
//! Two independent services with no shared state:
//!
//! - [`hashing`]: PBKDF2-HMAC-SHA512 password hashing with randomized
//!   per-password salt length and iteration count, plus an optional
//!   application-level pre-hash.
//! - [`encryption`]: AES-CBC encryption/decryption with hex-encoded keys
//!   and a fresh random IV embedded in every payload.
//!
//! All primitives (PBKDF2, AES, SHA-512, the CSPRNG) come from vetted
//! RustCrypto/`rand` crates; this crate only adds parameter validation,
//! random parameter selection, hex conversion policy, and error wrapping.

pub mod encryption;
pub mod errors;
pub mod hashing;

pub use errors::{PasscryptError, Result};
