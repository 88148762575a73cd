//! Raw-AES keyring: wraps/unwraps data keys locally under an
//! AES-GCM wrapping key the caller supplies directly (no remote key
//! service).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use subtle::ConstantTimeEq;

use crate::cipher::{gcm_open, gcm_seal};
use crate::context::EncryptionContext;
use crate::edk::{Edk, EdkList};
use crate::error::{Error, Result};
use crate::keyring::Keyring;
use crate::secret::SecretBytes;
use crate::suite::AlgorithmSuite;
use crate::trace::{KeyringTrace, DECRYPTED_DATA_KEY, ENCRYPTED_DATA_KEY, GENERATED_DATA_KEY};

const WRAP_TAG_LEN: usize = 16;
const WRAP_IV_LEN: usize = 12;

/// Wraps/unwraps data keys under a locally held AES-GCM key, identified by
/// a `(provider_namespace, key_name)` pair recorded in each EDK's
/// `provider_info`.
///
/// `provider_info` layout: `key_name_utf8 || u32_be(tag_len_bits) ||
/// u32_be(iv_len_bytes) || iv_bytes`.
pub struct RawAesKeyring {
    provider_namespace: Vec<u8>,
    key_name: Vec<u8>,
    wrapping_key: SecretBytes,
}

impl RawAesKeyring {
    /// `wrapping_key` must be 16, 24, or 32 bytes (AES-128/192/256).
    pub fn new(provider_namespace: impl Into<String>, key_name: impl Into<String>, wrapping_key: &[u8]) -> Result<Self> {
        if !matches!(wrapping_key.len(), 16 | 24 | 32) {
            return Err(Error::BadState);
        }
        Ok(Self {
            provider_namespace: provider_namespace.into().into_bytes(),
            key_name: key_name.into().into_bytes(),
            wrapping_key: SecretBytes::from_vec(wrapping_key.to_vec()),
        })
    }

    fn namespace_str(&self) -> &str {
        core::str::from_utf8(&self.provider_namespace).unwrap_or("")
    }

    fn key_name_str(&self) -> &str {
        core::str::from_utf8(&self.key_name).unwrap_or("")
    }

    fn matches(&self, edk: &Edk) -> bool {
        let ns_match: bool = self.provider_namespace.ct_eq(&edk.provider_namespace).into();
        if !ns_match {
            return false;
        }
        edk.provider_info.len() >= self.key_name.len()
            && bool::from(self.key_name.ct_eq(&edk.provider_info[..self.key_name.len()]))
    }

    fn encode_provider_info(&self, iv: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.key_name.len() + 4 + 4 + iv.len());
        out.extend_from_slice(&self.key_name);
        out.extend_from_slice(&((WRAP_TAG_LEN as u32) * 8).to_be_bytes());
        out.extend_from_slice(&(iv.len() as u32).to_be_bytes());
        out.extend_from_slice(iv);
        out
    }

    /// Parse the fixed-layout suffix after the key-name prefix. Returns
    /// `None` on any malformed field — callers treat that as "this EDK does
    /// not apply", not as an error.
    fn decode_provider_info<'a>(&self, provider_info: &'a [u8]) -> Option<&'a [u8]> {
        let rest = provider_info.get(self.key_name.len()..)?;
        if rest.len() < 8 {
            return None;
        }
        let tag_len_bits = u32::from_be_bytes(rest[0..4].try_into().ok()?);
        let iv_len_bytes = u32::from_be_bytes(rest[4..8].try_into().ok()?);
        if tag_len_bits as usize != WRAP_TAG_LEN * 8 || iv_len_bytes as usize != WRAP_IV_LEN {
            return None;
        }
        let iv = rest.get(8..8 + WRAP_IV_LEN)?;
        if rest.len() != 8 + WRAP_IV_LEN {
            return None;
        }
        Some(iv)
    }
}

impl Keyring for RawAesKeyring {
    fn on_encrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &mut EdkList,
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()> {
        let generated = data_key.is_empty();
        if generated {
            let mut bytes = alloc::vec![0u8; suite.data_key_len];
            getrandom::getrandom(&mut bytes).map_err(|_| Error::CryptoError)?;
            data_key.set(&bytes);
        }

        let mut iv = [0u8; WRAP_IV_LEN];
        getrandom::getrandom(&mut iv).map_err(|_| Error::CryptoError)?;

        let aad = enc_ctx.canonical_serialize()?;
        let ciphertext_and_tag = gcm_seal(self.wrapping_key.as_slice(), &iv, &aad, data_key.as_slice())?;
        let provider_info = self.encode_provider_info(&iv);

        edks.push(Edk::new(self.provider_namespace.clone(), provider_info, ciphertext_and_tag));

        let mut flags = ENCRYPTED_DATA_KEY;
        if generated {
            flags |= GENERATED_DATA_KEY;
        }
        trace.add_record(self.namespace_str(), self.key_name_str(), flags);
        Ok(())
    }

    fn on_decrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &[Edk],
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()> {
        let aad = enc_ctx.canonical_serialize()?;

        for edk in edks {
            if !self.matches(edk) {
                continue;
            }
            let Some(iv) = self.decode_provider_info(&edk.provider_info) else {
                continue;
            };
            match gcm_open(self.wrapping_key.as_slice(), iv, &aad, &edk.ciphertext) {
                Ok(plaintext) => {
                    if plaintext.len() != suite.data_key_len {
                        continue;
                    }
                    data_key.set(&plaintext);
                    trace.add_record(self.namespace_str(), self.key_name_str(), DECRYPTED_DATA_KEY);
                    return Ok(());
                }
                Err(_) => continue,
            }
        }
        Ok(())
    }
}
