//! Symmetric encryption for secrets at rest
//!
//! AES-256-CBC with PKCS7 padding and a fresh random 16-byte IV per call.
//! The blob format is `hex(iv)` (32 characters) followed by
//! `base64(ciphertext)`. This framing is a durable on-disk contract shared
//! with previously stored records and must round-trip exactly.
//!
//! Known weakness: CBC mode produces no authentication tag, so tampering
//! yields garbage plaintext or a padding failure instead of a
//! detected-forgery error. Switching to an authenticated mode would break
//! the stored format, so the limitation is documented rather than fixed.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use rand::RngCore;

use crate::domain::result::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Length of the hex-encoded IV prefix in the blob format
const IV_HEX_LEN: usize = 32;

fn check_key(key: &str) -> Result<&[u8]> {
    let bytes = key.as_bytes();
    if bytes.len() != 32 {
        // Wrong key length is a deployment mistake, not a request failure
        return Err(Error::config(
            "encryption key must be exactly 32 bytes for AES-256",
        ));
    }
    Ok(bytes)
}

/// Encrypt a plaintext into the durable `hex(iv) + base64(ciphertext)` blob
pub fn encrypt_aes256(plaintext: &str, key: &str) -> Result<String> {
    let key_bytes = check_key(key)?;

    let mut iv = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key_bytes, &iv)
        .map_err(|e| Error::Encryption(e.to_string()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(format!(
        "{}{}",
        hex::encode(iv),
        base64::engine::general_purpose::STANDARD.encode(ciphertext)
    ))
}

/// Decrypt a blob produced by [`encrypt_aes256`]
pub fn decrypt_aes256(blob: &str, key: &str) -> Result<String> {
    let key_bytes = check_key(key)?;

    let iv_hex = blob
        .get(..IV_HEX_LEN)
        .ok_or_else(|| Error::Encryption("blob is too short to contain an IV".to_string()))?;
    let payload = blob.get(IV_HEX_LEN..).unwrap_or("");

    let iv = hex::decode(iv_hex).map_err(|_| Error::Encryption("malformed IV prefix".to_string()))?;
    let ciphertext = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| Error::Encryption("malformed base64 payload".to_string()))?;

    let cipher = Aes256CbcDec::new_from_slices(key_bytes, &iv)
        .map_err(|e| Error::Encryption(e.to_string()))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| Error::Encryption("decryption failed (bad key or corrupt blob)".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| Error::Encryption("decrypted payload is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_roundtrip() {
        let plaintext = r#"{"provider":"bcp_pers","username":"demo","password":"demo1234"}"#;
        let blob = encrypt_aes256(plaintext, KEY).unwrap();
        let decrypted = decrypt_aes256(&blob, KEY).unwrap();
        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_blob_framing() {
        let blob = encrypt_aes256("secret", KEY).unwrap();

        // 32-character hex IV prefix, base64 payload after it
        assert!(blob.len() > 32);
        let iv_hex = &blob[..32];
        assert!(iv_hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hex::decode(iv_hex).unwrap().len(), 16);
        assert!(base64::engine::general_purpose::STANDARD
            .decode(&blob[32..])
            .is_ok());
    }

    #[test]
    fn test_fresh_iv_per_encryption() {
        let blob1 = encrypt_aes256("same plaintext", KEY).unwrap();
        let blob2 = encrypt_aes256("same plaintext", KEY).unwrap();

        assert_ne!(blob1, blob2);
        assert_ne!(&blob1[..32], &blob2[..32]);
        assert_eq!(decrypt_aes256(&blob1, KEY).unwrap(), "same plaintext");
        assert_eq!(decrypt_aes256(&blob2, KEY).unwrap(), "same plaintext");
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let blob = encrypt_aes256("", KEY).unwrap();
        assert_eq!(decrypt_aes256(&blob, KEY).unwrap(), "");
    }

    #[test]
    fn test_wrong_key_length_is_config_error() {
        let err = encrypt_aes256("data", "short-key").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = decrypt_aes256("00", "also short").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let other_key = "fedcba9876543210fedcba9876543210";
        let blob = encrypt_aes256("data", KEY).unwrap();

        // CBC has no auth tag: wrong key gives a padding error or garbage,
        // never the original plaintext
        match decrypt_aes256(&blob, other_key) {
            Ok(plaintext) => assert_ne!(plaintext, "data"),
            Err(err) => assert!(matches!(err, Error::Encryption(_))),
        }
    }

    #[test]
    fn test_truncated_blob_rejected() {
        assert!(decrypt_aes256("deadbeef", KEY).is_err());
        assert!(decrypt_aes256("", KEY).is_err());
    }

    #[test]
    fn test_non_hex_iv_rejected() {
        let blob = format!("{}{}", "zz".repeat(16), "QUJD");
        let err = decrypt_aes256(&blob, KEY).unwrap_err();
        assert!(matches!(err, Error::Encryption(_)));
    }
}
