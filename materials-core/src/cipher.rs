//! Content cipher: AES-GCM body encryption with HKDF-based content-key
//! derivation bound to the algorithm suite id and message id.
//!
//! The same AES-GCM primitive (`gcm_seal`/`gcm_open`) backs both the content
//! cipher below and the Raw-AES keyring's key-wrapping step — they differ
//! only in which key and AAD they're handed.

extern crate alloc;

use alloc::vec::Vec;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::aes::Aes192;
use aes_gcm::{aead::consts::U12, AesGcm, Nonce};
use hkdf::Hkdf;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{Error, Result};
use crate::secret::SecretBytes;
use crate::suite::{AlgorithmSuite, KdfAlgorithm};

type Aes128Gcm = aes_gcm::Aes128Gcm;
type Aes256Gcm = aes_gcm::Aes256Gcm;
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Seal `plaintext` under `key`/`iv`/`aad`. Returns `ciphertext || tag`
/// (RustCrypto's native AEAD layout, which the wire layouts in this crate
/// rely on directly).
pub(crate) fn gcm_seal(key: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let nonce = Nonce::<U12>::from_slice(iv);
    let payload = Payload { msg: plaintext, aad };
    match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::CryptoError),
        24 => Aes192Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::CryptoError),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::CryptoError),
        _ => Err(Error::BadState),
    }
}

/// Open `ciphertext_and_tag` (as produced by [`gcm_seal`]) under
/// `key`/`iv`/`aad`. Fails with [`Error::BadCiphertext`] on tag mismatch;
/// RustCrypto never hands back partial plaintext on failure, so there is no
/// buffer left to zeroize on this path.
pub(crate) fn gcm_open(key: &[u8], iv: &[u8], aad: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>> {
    let nonce = Nonce::<U12>::from_slice(iv);
    let payload = Payload { msg: ciphertext_and_tag, aad };
    match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::BadCiphertext),
        24 => Aes192Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::BadCiphertext),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoError)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::BadCiphertext),
        _ => Err(Error::BadState),
    }
}

/// Derive the per-message content key from the data key.
///
/// `info = suite_id_be(2) || message_id`. When the suite has no KDF, the
/// content key *is* the data key (same bytes, not cloned into a new
/// allocation is not guaranteed — callers get an owned [`SecretBytes`]
/// either way).
pub fn derive_content_key(data_key: &[u8], suite: &AlgorithmSuite, message_id: &[u8]) -> Result<SecretBytes> {
    if data_key.len() != suite.data_key_len {
        return Err(Error::BadState);
    }

    if matches!(suite.kdf, KdfAlgorithm::None) {
        return Ok(SecretBytes::from_vec(data_key.to_vec()));
    }

    let mut info = Vec::with_capacity(2 + message_id.len());
    info.extend_from_slice(&suite.suite_id.to_be_bytes());
    info.extend_from_slice(message_id);

    let mut out = alloc::vec![0u8; suite.content_key_len];
    match suite.kdf {
        KdfAlgorithm::HkdfSha256 => {
            Hkdf::<Sha256>::new(None, data_key)
                .expand(&info, &mut out)
                .map_err(|_| Error::CryptoError)?;
        }
        KdfAlgorithm::HkdfSha384 => {
            Hkdf::<Sha384>::new(None, data_key)
                .expand(&info, &mut out)
                .map_err(|_| Error::CryptoError)?;
        }
        KdfAlgorithm::HkdfSha512 => {
            Hkdf::<Sha512>::new(None, data_key)
                .expand(&info, &mut out)
                .map_err(|_| Error::CryptoError)?;
        }
        KdfAlgorithm::None => unreachable!(),
    }
    Ok(SecretBytes::from_vec(out))
}

/// Encrypt a message body. Returns `(ciphertext, tag)` with
/// `ciphertext.len() == plaintext.len()` and `tag.len() == suite.tag_len`.
pub fn encrypt_body(
    plaintext: &[u8],
    iv: &[u8],
    aad: &[u8],
    content_key: &[u8],
    suite: &AlgorithmSuite,
) -> Result<(Vec<u8>, Vec<u8>)> {
    if iv.len() != suite.iv_len || content_key.len() != suite.content_key_len {
        return Err(Error::BadState);
    }
    let mut combined = gcm_seal(content_key, iv, aad, plaintext)?;
    let tag = combined.split_off(combined.len() - suite.tag_len);
    Ok((combined, tag))
}

/// Decrypt and verify a message body. Fails with [`Error::BadCiphertext`] on
/// tag mismatch.
pub fn decrypt_body(
    ciphertext: &[u8],
    tag: &[u8],
    iv: &[u8],
    aad: &[u8],
    content_key: &[u8],
    suite: &AlgorithmSuite,
) -> Result<Vec<u8>> {
    if iv.len() != suite.iv_len || content_key.len() != suite.content_key_len || tag.len() != suite.tag_len {
        return Err(Error::BadState);
    }
    let mut combined = Vec::with_capacity(ciphertext.len() + tag.len());
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);
    gcm_open(content_key, iv, aad, &combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::{suite_by_id, AES_256_GCM_HKDF_SHA384_ECDSA_P384, AES_256_GCM_IV12_TAG16_NO_KDF};

    #[test]
    fn body_roundtrip_no_kdf_suite() {
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).unwrap();
        let content_key = [0x11u8; 32];
        let iv = [0x22u8; 12];
        let aad = b"aad";
        let (ct, tag) = encrypt_body(b"hello body", &iv, aad, &content_key, &suite).unwrap();
        let pt = decrypt_body(&ct, &tag, &iv, aad, &content_key, &suite).unwrap();
        assert_eq!(pt, b"hello body");
    }

    #[test]
    fn content_key_with_kdf_differs_from_data_key() {
        let suite = suite_by_id(AES_256_GCM_HKDF_SHA384_ECDSA_P384).unwrap();
        let data_key = [0x33u8; 32];
        let message_id = [0x01u8; 16];
        let content_key = derive_content_key(&data_key, &suite, &message_id).unwrap();
        assert_ne!(content_key.as_slice(), &data_key[..]);
        assert_eq!(content_key.len(), suite.content_key_len);
    }

    #[test]
    fn content_key_without_kdf_equals_data_key() {
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).unwrap();
        let data_key = [0x44u8; 32];
        let content_key = derive_content_key(&data_key, &suite, b"msgid").unwrap();
        assert_eq!(content_key.as_slice(), &data_key[..]);
    }

    #[test]
    fn derive_content_key_is_deterministic_per_message_id() {
        let suite = suite_by_id(AES_256_GCM_HKDF_SHA384_ECDSA_P384).unwrap();
        let data_key = [0x55u8; 32];
        let a = derive_content_key(&data_key, &suite, b"msg-a").unwrap();
        let b = derive_content_key(&data_key, &suite, b"msg-a").unwrap();
        let c = derive_content_key(&data_key, &suite, b"msg-b").unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_ne!(a.as_slice(), c.as_slice());
    }

    #[test]
    fn tampered_tag_fails_closed() {
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).unwrap();
        let content_key = [0x66u8; 32];
        let iv = [0x77u8; 12];
        let (ct, mut tag) = encrypt_body(b"secret", &iv, b"aad", &content_key, &suite).unwrap();
        tag[0] ^= 0xFF;
        let err = decrypt_body(&ct, &tag, &iv, b"aad", &content_key, &suite).unwrap_err();
        assert_eq!(err, Error::BadCiphertext);
    }

    #[test]
    fn wrong_aad_fails_closed() {
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).unwrap();
        let content_key = [0x88u8; 32];
        let iv = [0x99u8; 12];
        let (ct, tag) = encrypt_body(b"secret", &iv, b"good-aad", &content_key, &suite).unwrap();
        let err = decrypt_body(&ct, &tag, &iv, b"bad-aad", &content_key, &suite).unwrap_err();
        assert_eq!(err, Error::BadCiphertext);
    }
}
