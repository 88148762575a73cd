//! Crypto Materials Manager: turns a keyring into the source of
//! encryption/decryption materials, handling suite selection, message id
//! generation, and trailing-signature context wiring.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::context::EncryptionContext;
use crate::edk::EdkList;
use crate::error::{Error, Result};
use crate::keyring::{checked_on_decrypt, checked_on_encrypt, Keyring};
use crate::materials::{DecryptionMaterials, DecryptionRequest, EncryptionMaterials, EncryptionRequest};
use crate::secret::SecretBytes;
use crate::signature::{RandomSignatureProvider, SignatureProvider};
use crate::suite::{suite_by_id, AlgorithmSuite, DEFAULT_SUITE_ID};
use crate::trace::{KeyringTrace, SIGNED_ENC_CTX, VERIFIED_ENC_CTX};

/// Encryption-context key the trailing-signature public point is stored
/// under. Reserved: callers must not set this key themselves.
pub const RESERVED_PUBLIC_KEY_CONTEXT_KEY: &str = "aws-crypto-public-key";

const MESSAGE_ID_LEN: usize = 16;

/// Produces materials for one encrypt or decrypt operation from a single
/// keyring (which may itself be a [`crate::multi_keyring::MultiKeyring`]).
pub trait Cmm: Send + Sync {
    fn generate_encryption_materials(&self, request: &EncryptionRequest<'_>) -> Result<EncryptionMaterials>;
    fn decrypt_materials(&self, request: &DecryptionRequest<'_>) -> Result<DecryptionMaterials>;
}

/// The stock [`Cmm`]: a single keyring plus suite selection and
/// trailing-signature context wiring.
pub struct DefaultCmm {
    keyring: Arc<dyn Keyring>,
    suite_id: u16,
    signature_provider: Arc<dyn SignatureProvider>,
}

impl DefaultCmm {
    pub fn new(keyring: Arc<dyn Keyring>) -> Self {
        Self {
            keyring,
            suite_id: DEFAULT_SUITE_ID,
            signature_provider: Arc::new(RandomSignatureProvider),
        }
    }

    /// Pin the algorithm suite used when a request does not specify one.
    pub fn with_suite(mut self, suite_id: u16) -> Self {
        self.suite_id = suite_id;
        self
    }

    /// Override the trailing-signature key-pair seam.
    pub fn with_signature_provider(mut self, provider: Arc<dyn SignatureProvider>) -> Self {
        self.signature_provider = provider;
        self
    }

    /// A caller may only pin the suite this CMM is already configured for;
    /// pinning a different one is rejected rather than honored.
    fn resolve_suite(&self, requested: Option<u16>) -> Result<AlgorithmSuite> {
        match requested {
            Some(id) if id != self.suite_id => Err(Error::UnsupportedFormat),
            _ => suite_by_id(self.suite_id),
        }
    }
}

impl Cmm for DefaultCmm {
    fn generate_encryption_materials(&self, request: &EncryptionRequest<'_>) -> Result<EncryptionMaterials> {
        let suite = self.resolve_suite(request.requested_suite_id)?;

        let mut message_id = [0u8; MESSAGE_ID_LEN];
        getrandom::getrandom(&mut message_id).map_err(|_| Error::CryptoError)?;

        let mut enc_ctx = request.encryption_context.clone();
        if enc_ctx.get(RESERVED_PUBLIC_KEY_CONTEXT_KEY).is_some() {
            return Err(Error::BadState);
        }

        let mut trace = KeyringTrace::new();
        let signing_key = if suite.is_signed() {
            let (signing_key, public_key_b64) = self.signature_provider.generate_key_pair(&suite)?;
            enc_ctx.insert(RESERVED_PUBLIC_KEY_CONTEXT_KEY, public_key_b64);
            trace.add_record("cmm", "trailing-signature", SIGNED_ENC_CTX);
            Some(signing_key)
        } else {
            None
        };

        let mut data_key = SecretBytes::new();
        let mut edks: EdkList = Vec::new();
        checked_on_encrypt(self.keyring.as_ref(), &mut data_key, &mut edks, &enc_ctx, &suite, &mut trace)?;

        tracing::debug!(suite_id = suite.suite_id, edk_count = edks.len(), "generated encryption materials");

        Ok(EncryptionMaterials {
            suite,
            data_key,
            edks,
            encryption_context: enc_ctx,
            trace,
            signing_key,
        })
    }

    fn decrypt_materials(&self, request: &DecryptionRequest<'_>) -> Result<DecryptionMaterials> {
        let suite = suite_by_id(request.suite_id)?;

        let mut trace = KeyringTrace::new();
        let mut data_key = SecretBytes::new();
        checked_on_decrypt(
            self.keyring.as_ref(),
            &mut data_key,
            request.edks,
            request.encryption_context,
            &suite,
            &mut trace,
        )?;

        if data_key.is_empty() {
            return Err(Error::cannot_decrypt());
        }

        let verification_key_b64 = if suite.is_signed() {
            let public_key_b64 = request
                .encryption_context
                .get(RESERVED_PUBLIC_KEY_CONTEXT_KEY)
                .ok_or(Error::BadCiphertext)?;
            let handle = self.signature_provider.verification_handle(&suite, public_key_b64)?;
            trace.add_record("cmm", "trailing-signature", VERIFIED_ENC_CTX);
            Some(handle.public_key_b64)
        } else {
            None
        };

        tracing::debug!(suite_id = suite.suite_id, "recovered decryption materials");

        Ok(DecryptionMaterials {
            suite,
            data_key,
            verification_key_b64,
            trace,
        })
    }
}
