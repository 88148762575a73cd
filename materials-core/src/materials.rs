//! Encryption/decryption materials and the requests that produce them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::context::EncryptionContext;
use crate::edk::EdkList;
use crate::secret::SecretBytes;
use crate::signature::SigningKeyHandle;
use crate::suite::AlgorithmSuite;
use crate::trace::KeyringTrace;

/// Everything the message-framing layer needs to begin an encrypt
/// operation: the wrapping-key output of one call to
/// [`crate::cmm::Cmm::generate_encryption_materials`].
#[derive(Debug)]
pub struct EncryptionMaterials {
    pub suite: AlgorithmSuite,
    pub data_key: SecretBytes,
    pub edks: EdkList,
    pub encryption_context: EncryptionContext,
    pub trace: KeyringTrace,
    pub signing_key: Option<SigningKeyHandle>,
}

/// Caller-supplied parameters for generating encryption materials.
///
/// `requested_suite_id` pins the algorithm suite; when `None`, the CMM uses
/// [`crate::suite::DEFAULT_SUITE_ID`].
#[derive(Debug)]
pub struct EncryptionRequest<'a> {
    pub encryption_context: &'a EncryptionContext,
    pub requested_suite_id: Option<u16>,
    pub plaintext_len_hint: Option<u64>,
}

impl<'a> EncryptionRequest<'a> {
    pub fn new(encryption_context: &'a EncryptionContext) -> Self {
        Self {
            encryption_context,
            requested_suite_id: None,
            plaintext_len_hint: None,
        }
    }

    pub fn with_suite_id(mut self, suite_id: u16) -> Self {
        self.requested_suite_id = Some(suite_id);
        self
    }

    pub fn with_plaintext_len_hint(mut self, len: u64) -> Self {
        self.plaintext_len_hint = Some(len);
        self
    }
}

/// Everything the message-framing layer needs to begin a decrypt
/// operation: the recovered data key plus the verification context.
#[derive(Debug)]
pub struct DecryptionMaterials {
    pub suite: AlgorithmSuite,
    pub data_key: SecretBytes,
    pub verification_key_b64: Option<String>,
    pub trace: KeyringTrace,
}

/// Caller-supplied parameters for recovering decryption materials: the
/// suite id and EDK list read from the ciphertext header, plus the
/// encryption context read alongside them.
#[derive(Debug)]
pub struct DecryptionRequest<'a> {
    pub suite_id: u16,
    pub edks: &'a [crate::edk::Edk],
    pub encryption_context: &'a EncryptionContext,
}

impl<'a> DecryptionRequest<'a> {
    pub fn new(suite_id: u16, edks: &'a [crate::edk::Edk], encryption_context: &'a EncryptionContext) -> Self {
        Self { suite_id, edks, encryption_context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_request_builder_sets_optional_fields() {
        let ctx = EncryptionContext::new();
        let req = EncryptionRequest::new(&ctx).with_suite_id(0x0078).with_plaintext_len_hint(42);
        assert_eq!(req.requested_suite_id, Some(0x0078));
        assert_eq!(req.plaintext_len_hint, Some(42));
    }
}
