//! The `KmsClient` seam: the wire protocol to an actual KMS endpoint is an
//! external collaborator this crate does not implement. Real deployments
//! plug in their own implementation (typically backed by an async AWS SDK
//! client, bridged synchronously at this boundary); [`MockKmsClient`] is the
//! only implementation shipped here, for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use materials_core::cipher::{decrypt_body, encrypt_body};
use materials_core::suite::{suite_by_id, AES_256_GCM_IV12_TAG16_NO_KDF};
use materials_core::SecretBytes;

use crate::error::{KmsKeyringError, Result};

pub struct GenerateDataKeyOutcome {
    pub key_id: String,
    pub plaintext: SecretBytes,
    pub ciphertext_blob: Vec<u8>,
}

pub struct EncryptOutcome {
    pub key_id: String,
    pub ciphertext_blob: Vec<u8>,
}

pub struct DecryptOutcome {
    pub key_id: String,
    pub plaintext: SecretBytes,
}

/// A KMS-like service: generates data keys, and encrypts/decrypts
/// arbitrary plaintext under a CMK, binding the encryption context as
/// additional authenticated data.
pub trait KmsClient: Send + Sync {
    fn generate_data_key(&self, key_id: &str, enc_ctx_aad: &[u8], number_of_bytes: usize) -> Result<GenerateDataKeyOutcome>;

    fn encrypt(&self, key_id: &str, plaintext: &[u8], enc_ctx_aad: &[u8]) -> Result<EncryptOutcome>;

    /// `key_id_hint` is advisory only — a real KMS decrypts whatever CMK the
    /// ciphertext blob names; this client verifies the response matches the
    /// hint so [`crate::keyring::KmsKeyring`] can fail closed on mismatch.
    fn decrypt(&self, ciphertext_blob: &[u8], enc_ctx_aad: &[u8], key_id_hint: &str) -> Result<DecryptOutcome>;
}

const MOCK_MASTER_KEY_LEN: usize = 32;
const MOCK_IV_LEN: usize = 12;

/// An in-memory stand-in for a KMS endpoint.
///
/// Each CMK is a random 32-byte master key generated (or pre-registered)
/// the first time it is addressed. Wrapping reuses
/// [`materials_core::cipher::encrypt_body`]/[`materials_core::cipher::decrypt_body`]
/// under the no-KDF 256-bit suite, so this client needs no cryptographic
/// dependency of its own.
pub struct MockKmsClient {
    master_keys: Mutex<HashMap<String, [u8; MOCK_MASTER_KEY_LEN]>>,
}

impl MockKmsClient {
    pub fn new() -> Self {
        Self { master_keys: Mutex::new(HashMap::new()) }
    }

    /// Pre-register a CMK's master key, e.g. to make two independent
    /// `MockKmsClient`s behave as if they shared a KMS backend.
    pub fn register_key(&self, key_id: impl Into<String>, master_key: [u8; MOCK_MASTER_KEY_LEN]) {
        self.master_keys.lock().unwrap().insert(key_id.into(), master_key);
    }

    fn master_key_for(&self, key_id: &str) -> [u8; MOCK_MASTER_KEY_LEN] {
        let mut keys = self.master_keys.lock().unwrap();
        *keys.entry(key_id.to_string()).or_insert_with(|| {
            let mut bytes = [0u8; MOCK_MASTER_KEY_LEN];
            getrandom::getrandom(&mut bytes).expect("getrandom must succeed");
            bytes
        })
    }

    fn wrap(&self, key_id: &str, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let master_key = self.master_key_for(key_id);
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).expect("built in suite always resolves");
        let mut iv = [0u8; MOCK_IV_LEN];
        getrandom::getrandom(&mut iv).map_err(|_| KmsKeyringError::ServiceError("rng failure".into()))?;
        let (ciphertext, tag) = encrypt_body(plaintext, &iv, aad, &master_key, &suite)
            .map_err(|e| KmsKeyringError::ServiceError(format!("{e}")))?;
        let mut blob = Vec::with_capacity(MOCK_IV_LEN + ciphertext.len() + tag.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        blob.extend_from_slice(&tag);
        Ok(blob)
    }

    fn unwrap(&self, key_id: &str, blob: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let suite = suite_by_id(AES_256_GCM_IV12_TAG16_NO_KDF).expect("built in suite always resolves");
        if blob.len() < MOCK_IV_LEN + suite.tag_len {
            return Err(KmsKeyringError::ServiceError("ciphertext blob too short".into()));
        }
        let (iv, rest) = blob.split_at(MOCK_IV_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - suite.tag_len);
        let master_key = self.master_key_for(key_id);
        decrypt_body(ciphertext, tag, iv, aad, &master_key, &suite).map_err(|e| KmsKeyringError::ServiceError(format!("{e}")))
    }
}

impl Default for MockKmsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KmsClient for MockKmsClient {
    fn generate_data_key(&self, key_id: &str, enc_ctx_aad: &[u8], number_of_bytes: usize) -> Result<GenerateDataKeyOutcome> {
        let mut plaintext = vec![0u8; number_of_bytes];
        getrandom::getrandom(&mut plaintext).map_err(|_| KmsKeyringError::ServiceError("rng failure".into()))?;
        let ciphertext_blob = self.wrap(key_id, &plaintext, enc_ctx_aad)?;
        Ok(GenerateDataKeyOutcome {
            key_id: key_id.to_string(),
            plaintext: SecretBytes::from_vec(plaintext),
            ciphertext_blob,
        })
    }

    fn encrypt(&self, key_id: &str, plaintext: &[u8], enc_ctx_aad: &[u8]) -> Result<EncryptOutcome> {
        let ciphertext_blob = self.wrap(key_id, plaintext, enc_ctx_aad)?;
        Ok(EncryptOutcome { key_id: key_id.to_string(), ciphertext_blob })
    }

    fn decrypt(&self, ciphertext_blob: &[u8], enc_ctx_aad: &[u8], key_id_hint: &str) -> Result<DecryptOutcome> {
        let plaintext = self.unwrap(key_id_hint, ciphertext_blob, enc_ctx_aad)?;
        Ok(DecryptOutcome { key_id: key_id_hint.to_string(), plaintext: SecretBytes::from_vec(plaintext) })
    }
}
