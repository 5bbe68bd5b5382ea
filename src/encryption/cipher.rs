//! AES-CBC encryption and decryption with PKCS#7 padding.
//!
//! Each call to `encrypt` builds a fresh cipher context with a random
//! 16-byte IV and returns the IV and ciphertext hex-encoded as
//! `<hexIV>_<hexCipherText>`.  `decrypt` parses the payload back out
//! and overrides the context's IV with the decoded one.
//!
//! Contexts never outlive a single call and the key material is wiped
//! when the context drops.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use rand::{RngCore, TryRngCore};
use zeroize::Zeroize;

use super::payload::EncryptedPayload;
use crate::errors::{PasscryptError, Result};

/// AES block size in bytes.  Fixed at 128 bits for every key size, so
/// the IV is always 16 bytes.
pub const BLOCK_SIZE: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// The three supported AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// All supported sizes, in probing order for [`is_encrypted`].
    pub const ALL: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

    /// Map a bit count to a key size; anything but 128/192/256 fails.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(KeySize::Aes128),
            192 => Ok(KeySize::Aes192),
            256 => Ok(KeySize::Aes256),
            other => Err(PasscryptError::InvalidKeySize(other)),
        }
    }

    /// Key size in bits.
    pub fn bits(self) -> u32 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }

    /// Expected decoded key length in bytes.
    pub fn byte_len(self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// A configured AES-CBC cipher: validated key bytes plus an IV.
///
/// Scoped to a single encrypt or decrypt call; the key is zeroed on
/// drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct CipherContext {
    key: Vec<u8>,
    iv: [u8; BLOCK_SIZE],
    #[zeroize(skip)]
    size: KeySize,
}

impl CipherContext {
    /// Decode and validate a hex key, then pair it with a fresh random
    /// IV from the OS CSPRNG.
    ///
    /// Fails on a blank key, non-hex input, or a decoded length that
    /// does not match `size.byte_len()`.
    pub fn new(key_hex: &str, size: KeySize) -> Result<Self> {
        let key = decode_key(key_hex, size)?;

        // An OS entropy failure is not recoverable, so the infallible
        // adapter is fine here.
        let mut iv = [0u8; BLOCK_SIZE];
        rand::rngs::OsRng.unwrap_err().fill_bytes(&mut iv);

        Ok(Self { key, iv, size })
    }

    /// Same key validation as [`CipherContext::new`], but with the IV
    /// taken from a decoded payload instead of the CSPRNG.  The decrypt
    /// path never consumes entropy.
    pub fn with_iv(key_hex: &str, size: KeySize, iv: [u8; BLOCK_SIZE]) -> Result<Self> {
        let key = decode_key(key_hex, size)?;
        Ok(Self { key, iv, size })
    }

    /// The IV this context will encrypt or decrypt with.
    pub fn iv(&self) -> &[u8; BLOCK_SIZE] {
        &self.iv
    }

    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = match self.size {
            KeySize::Aes128 => Aes128CbcEnc::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            KeySize::Aes192 => Aes192CbcEnc::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            KeySize::Aes256 => Aes256CbcEnc::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        };
        Ok(ciphertext)
    }

    fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let result = match self.size {
            KeySize::Aes128 => Aes128CbcDec::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            KeySize::Aes192 => Aes192CbcDec::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            KeySize::Aes256 => Aes256CbcDec::new_from_slices(&self.key, &self.iv)
                .map_err(init_error)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };
        result.map_err(|_| {
            PasscryptError::CryptoPrimitive(
                "PKCS#7 unpadding failed (wrong key or corrupted ciphertext)".into(),
            )
        })
    }
}

/// Decode a hex key and check it against the expected length for the
/// key size.
fn decode_key(key_hex: &str, size: KeySize) -> Result<Vec<u8>> {
    if key_hex.trim().is_empty() {
        return Err(PasscryptError::EmptyKey);
    }
    let key = hex::decode(key_hex)?;
    if key.len() != size.byte_len() {
        return Err(PasscryptError::KeyLengthMismatch {
            expected: size.byte_len(),
            got: key.len(),
        });
    }
    Ok(key)
}

// Key and IV lengths are validated before the cipher is built, so this
// only fires on an unanticipated primitive rejection.
fn init_error(e: aes::cipher::InvalidLength) -> PasscryptError {
    PasscryptError::Unspecified(format!("cipher init failed: {e}"))
}

/// Encrypt `plain_text` with a hex-encoded key.
///
/// Generates a fresh random IV and returns `<hexIV>_<hexCipherText>`.
/// Fails on blank plaintext/key or a key of the wrong length.
pub fn encrypt(plain_text: &str, key_hex: &str, size: KeySize) -> Result<String> {
    if plain_text.trim().is_empty() {
        return Err(PasscryptError::EmptyPlaintext);
    }

    let ctx = CipherContext::new(key_hex, size)?;
    let ciphertext = ctx.encrypt_bytes(plain_text.as_bytes())?;

    Ok(EncryptedPayload::new(*ctx.iv(), ciphertext).encode())
}

/// Decrypt a `<hexIV>_<hexCipherText>` payload back to text.
///
/// Fails on blank inputs, a malformed payload, a wrong key (surfacing
/// as a padding failure), or decrypted bytes that are not valid UTF-8.
pub fn decrypt(payload: &str, key_hex: &str, size: KeySize) -> Result<String> {
    if payload.trim().is_empty() {
        return Err(PasscryptError::EmptyCiphertext);
    }

    let parsed = EncryptedPayload::parse(payload)?;
    let ctx = CipherContext::with_iv(key_hex, size, parsed.iv)?;
    let plaintext = ctx.decrypt_bytes(&parsed.ciphertext)?;

    String::from_utf8(plaintext).map_err(|_| PasscryptError::InvalidUtf8)
}

/// Best-effort probe: does `text` look like a payload we can decrypt
/// with this key under any supported key size?
///
/// A random string can spuriously decrypt, so this is a format sniff
/// only, never a security check.
pub fn is_encrypted(text: &str, key_hex: &str) -> bool {
    KeySize::ALL
        .iter()
        .any(|size| decrypt(text, key_hex, *size).is_ok())
}
