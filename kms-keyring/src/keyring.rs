//! KMS keyring: wraps/unwraps a data key under exactly one CMK.
//!
//! Multi-CMK encryption is built by composing several `KmsKeyring`s behind
//! `materials_core::MultiKeyring` rather than by teaching this keyring
//! about a list of key ids itself — the generator/children fan-out that
//! requires is already implemented (and tested) once, in
//! `materials_core`.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use materials_core::context::EncryptionContext;
use materials_core::edk::{Edk, EdkList};
use materials_core::error::{Error, Result};
use materials_core::keyring::Keyring;
use materials_core::secret::SecretBytes;
use materials_core::suite::AlgorithmSuite;
use materials_core::trace::{KeyringTrace, DECRYPTED_DATA_KEY, ENCRYPTED_DATA_KEY, GENERATED_DATA_KEY};

use crate::arn;
use crate::client::KmsClient;
use crate::error::KmsKeyringError;
use crate::supplier::ClientSupplier;

pub const PROVIDER_NAMESPACE: &[u8] = b"aws-kms";

fn to_materials_error(context: &str, err: KmsKeyringError) -> Error {
    Error::KmsFailure(vec![format!("{context}: {err}")])
}

/// Wraps/unwraps a data key under one KMS CMK, identified by a full ARN or,
/// when a default region is configured, a bare key id/alias.
pub struct KmsKeyring {
    key_id: String,
    region: String,
    client_supplier: Arc<dyn ClientSupplier>,
    grant_tokens: Vec<String>,
}

impl KmsKeyring {
    /// `key_id` must be a full KMS key (or alias) ARN — see [`arn`]. A bare
    /// key id/alias is rejected here; use
    /// [`Self::new_with_default_region`] to allow one, resolved against a
    /// configured default region.
    pub fn new(key_id: impl Into<String>, client_supplier: Arc<dyn ClientSupplier>) -> crate::error::Result<Self> {
        Self::new_with_default_region(key_id, client_supplier, None)
    }

    /// Like [`Self::new`], falling back to `default_region` when `key_id`
    /// is not a full ARN. Fails with [`KmsKeyringError::UnresolvedRegion`]
    /// (folded into `KmsFailure` at the trait boundary) only when neither
    /// source yields a region.
    pub fn new_with_default_region(
        key_id: impl Into<String>,
        client_supplier: Arc<dyn ClientSupplier>,
        default_region: Option<&str>,
    ) -> crate::error::Result<Self> {
        let key_id = key_id.into();
        let region = arn::resolve_region(&key_id, default_region)?;
        Ok(Self { key_id, region, client_supplier, grant_tokens: Vec::new() })
    }

    pub fn with_grant_tokens(mut self, grant_tokens: Vec<String>) -> Self {
        self.grant_tokens = grant_tokens;
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    fn client(&self) -> Result<Arc<dyn KmsClient>> {
        self.client_supplier
            .client_for_region(&self.region)
            .map_err(|e| to_materials_error("client supplier", e))
    }

    fn matches(&self, edk: &Edk) -> bool {
        let ns_match: bool = PROVIDER_NAMESPACE.ct_eq(&edk.provider_namespace).into();
        ns_match && bool::from(self.key_id.as_bytes().ct_eq(&edk.provider_info))
    }

    fn verify_key_id(&self, returned: &str) -> Result<()> {
        if bool::from(self.key_id.as_bytes().ct_eq(returned.as_bytes())) {
            Ok(())
        } else {
            Err(to_materials_error(
                "verify_key_id",
                KmsKeyringError::KeyIdMismatch { expected: self.key_id.clone(), actual: returned.into() },
            ))
        }
    }
}

impl Keyring for KmsKeyring {
    fn on_encrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &mut EdkList,
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()> {
        let aad = enc_ctx.canonical_serialize()?;
        let client = self.client()?;

        if data_key.is_empty() {
            let outcome = client
                .generate_data_key(&self.key_id, &aad, suite.data_key_len)
                .map_err(|e| to_materials_error("generate_data_key", e))?;
            self.verify_key_id(&outcome.key_id)?;
            data_key.set(outcome.plaintext.as_slice());
            edks.push(Edk::new(PROVIDER_NAMESPACE.to_vec(), self.key_id.as_bytes().to_vec(), outcome.ciphertext_blob));
            trace.add_record("aws-kms", self.key_id.clone(), GENERATED_DATA_KEY | ENCRYPTED_DATA_KEY);
        } else {
            let outcome = client
                .encrypt(&self.key_id, data_key.as_slice(), &aad)
                .map_err(|e| to_materials_error("encrypt", e))?;
            self.verify_key_id(&outcome.key_id)?;
            edks.push(Edk::new(PROVIDER_NAMESPACE.to_vec(), self.key_id.as_bytes().to_vec(), outcome.ciphertext_blob));
            trace.add_record("aws-kms", self.key_id.clone(), ENCRYPTED_DATA_KEY);
        }
        tracing::debug!(key_id = %self.key_id, grant_tokens = self.grant_tokens.len(), "kms keyring on_encrypt");
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
        let client = self.client()?;
        let mut diagnostics: Vec<String> = Vec::new();

        for edk in edks {
            if !self.matches(edk) {
                continue;
            }
            match client.decrypt(&edk.ciphertext, &aad, &self.key_id) {
                Ok(outcome) => {
                    if !bool::from(self.key_id.as_bytes().ct_eq(outcome.key_id.as_bytes())) {
                        let mismatch =
                            KmsKeyringError::KeyIdMismatch { expected: self.key_id.clone(), actual: outcome.key_id };
                        diagnostics.push(mismatch.to_string());
                        continue;
                    }
                    if outcome.plaintext.len() != suite.data_key_len {
                        diagnostics.push(format!("kms plaintext length mismatch for {}", self.key_id));
                        continue;
                    }
                    data_key.set(outcome.plaintext.as_slice());
                    trace.add_record("aws-kms", self.key_id.clone(), DECRYPTED_DATA_KEY);
                    tracing::debug!(key_id = %self.key_id, "kms keyring recovered data key");
                    return Ok(());
                }
                Err(e) => {
                    diagnostics.push(format!("{}: {e}", self.key_id));
                    continue;
                }
            }
        }

        if !diagnostics.is_empty() {
            tracing::debug!(key_id = %self.key_id, attempts = diagnostics.len(), "kms keyring found no usable edk");
        }
        Ok(())
    }
}
