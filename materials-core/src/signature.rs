//! Trailing-signature key-pair seam.
//!
//! Signature and hash primitives beyond HKDF are assumed available from a
//! trusted cryptographic library external to this crate (see the crate-level
//! docs). [`SignatureProvider`] is the interface the Default CMM depends on
//! to generate a per-message signing key pair and to recover a verification
//! handle from the public key recorded in the encryption context; it is not
//! meant to be a production signature implementation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::suite::AlgorithmSuite;

/// Opaque handle to a signing private key, scoped to one encrypt operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningKeyHandle {
    pub public_key_b64: String,
}

/// Opaque handle to a recovered verification (public) key, scoped to one
/// decrypt operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKeyHandle {
    pub public_key_b64: String,
}

/// External collaborator seam for trailing-signature key material.
pub trait SignatureProvider: Send + Sync {
    /// Generate a fresh key pair for `suite`. Returns the signing handle and
    /// the base64-encoded public point to store in the encryption context
    /// under [`crate::cmm::RESERVED_PUBLIC_KEY_CONTEXT_KEY`].
    fn generate_key_pair(&self, suite: &AlgorithmSuite) -> Result<(SigningKeyHandle, String)>;

    /// Recover a verification handle from the base64-encoded public point
    /// read back out of the encryption context.
    fn verification_handle(&self, suite: &AlgorithmSuite, public_key_b64: &str) -> Result<VerificationKeyHandle>;
}

/// Default [`SignatureProvider`]: generates a random placeholder key pair.
///
/// Real ECDSA key generation and the signature itself belong to the
/// message-framing layer this crate deliberately does not implement (see
/// crate docs); this provider only exercises the wiring described in
/// `spec.md` §4.3 (insert public key into context on encrypt, recover it on
/// decrypt) so callers can supply a real implementation behind the same
/// trait without touching the CMM.
pub struct RandomSignatureProvider;

const PLACEHOLDER_POINT_LEN: usize = 32;

impl SignatureProvider for RandomSignatureProvider {
    fn generate_key_pair(&self, _suite: &AlgorithmSuite) -> Result<(SigningKeyHandle, String)> {
        let mut point = alloc::vec![0u8; PLACEHOLDER_POINT_LEN];
        getrandom::getrandom(&mut point).map_err(|_| Error::CryptoError)?;
        let public_key_b64 = crate::base64::encode(&point);
        Ok((
            SigningKeyHandle { public_key_b64: public_key_b64.clone() },
            public_key_b64,
        ))
    }

    fn verification_handle(&self, _suite: &AlgorithmSuite, public_key_b64: &str) -> Result<VerificationKeyHandle> {
        crate::base64::decode(public_key_b64).map_err(|_| Error::BadCiphertext)?;
        Ok(VerificationKeyHandle { public_key_b64: public_key_b64.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::{suite_by_id, AES_256_GCM_HKDF_SHA384_ECDSA_P384};

    #[test]
    fn generate_then_recover_round_trips() {
        let suite = suite_by_id(AES_256_GCM_HKDF_SHA384_ECDSA_P384).unwrap();
        let provider = RandomSignatureProvider;
        let (handle, public_key_b64) = provider.generate_key_pair(&suite).unwrap();
        assert_eq!(handle.public_key_b64, public_key_b64);
        let verification = provider.verification_handle(&suite, &public_key_b64).unwrap();
        assert_eq!(verification.public_key_b64, public_key_b64);
    }

    #[test]
    fn malformed_public_key_rejected() {
        let suite = suite_by_id(AES_256_GCM_HKDF_SHA384_ECDSA_P384).unwrap();
        let provider = RandomSignatureProvider;
        let err = provider.verification_handle(&suite, "not base64!!").unwrap_err();
        assert_eq!(err, Error::BadCiphertext);
    }
}
