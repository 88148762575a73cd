//! Algorithm suite catalog.
//!
//! A static, side-effect-free lookup from `suite_id` to [`AlgorithmSuite`].
//! Unknown ids fail with [`Error::UnsupportedFormat`].

use crate::error::{Error, Result};

/// Maximum data-key length across all known suites.
pub const MAX_DATA_KEY_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KdfAlgorithm {
    None,
    HkdfSha256,
    HkdfSha384,
    HkdfSha512,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    None,
    EcdsaP256Sha256,
    EcdsaP384Sha384,
}

/// An immutable catalog entry: a named combination of body cipher, KDF, and
/// signature algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmSuite {
    pub suite_id: u16,
    pub data_key_len: usize,
    pub content_key_len: usize,
    pub iv_len: usize,
    pub tag_len: usize,
    pub kdf: KdfAlgorithm,
    pub signature: SignatureAlgorithm,
}

impl AlgorithmSuite {
    pub fn is_signed(&self) -> bool {
        !matches!(self.signature, SignatureAlgorithm::None)
    }

    pub fn has_kdf(&self) -> bool {
        !matches!(self.kdf, KdfAlgorithm::None)
    }
}

macro_rules! suite {
    ($id:expr, $dk:expr, $kdf:expr, $sig:expr) => {
        AlgorithmSuite {
            suite_id: $id,
            data_key_len: $dk,
            content_key_len: $dk,
            iv_len: 12,
            tag_len: 16,
            kdf: $kdf,
            signature: $sig,
        }
    };
}

pub const AES_128_GCM_IV12_TAG16_NO_KDF: u16 = 0x0014;
pub const AES_192_GCM_IV12_TAG16_NO_KDF: u16 = 0x0046;
pub const AES_256_GCM_IV12_TAG16_NO_KDF: u16 = 0x0078;
pub const AES_128_GCM_HKDF_SHA256: u16 = 0x0114;
pub const AES_192_GCM_HKDF_SHA256: u16 = 0x0146;
pub const AES_256_GCM_HKDF_SHA256: u16 = 0x0178;
pub const AES_128_GCM_HKDF_SHA256_ECDSA_P256: u16 = 0x0214;
pub const AES_192_GCM_HKDF_SHA384_ECDSA_P384: u16 = 0x0346;
pub const AES_256_GCM_HKDF_SHA384_ECDSA_P384: u16 = 0x0378;

/// Default suite used by [`crate::cmm::DefaultCmm`] when the caller does not
/// pin one.
pub const DEFAULT_SUITE_ID: u16 = AES_256_GCM_HKDF_SHA384_ECDSA_P384;

const CATALOG: &[AlgorithmSuite] = &[
    suite!(AES_128_GCM_IV12_TAG16_NO_KDF, 16, KdfAlgorithm::None, SignatureAlgorithm::None),
    suite!(AES_192_GCM_IV12_TAG16_NO_KDF, 24, KdfAlgorithm::None, SignatureAlgorithm::None),
    suite!(AES_256_GCM_IV12_TAG16_NO_KDF, 32, KdfAlgorithm::None, SignatureAlgorithm::None),
    suite!(AES_128_GCM_HKDF_SHA256, 16, KdfAlgorithm::HkdfSha256, SignatureAlgorithm::None),
    suite!(AES_192_GCM_HKDF_SHA256, 24, KdfAlgorithm::HkdfSha256, SignatureAlgorithm::None),
    suite!(AES_256_GCM_HKDF_SHA256, 32, KdfAlgorithm::HkdfSha256, SignatureAlgorithm::None),
    suite!(
        AES_128_GCM_HKDF_SHA256_ECDSA_P256,
        16,
        KdfAlgorithm::HkdfSha256,
        SignatureAlgorithm::EcdsaP256Sha256
    ),
    suite!(
        AES_192_GCM_HKDF_SHA384_ECDSA_P384,
        24,
        KdfAlgorithm::HkdfSha384,
        SignatureAlgorithm::EcdsaP384Sha384
    ),
    suite!(
        AES_256_GCM_HKDF_SHA384_ECDSA_P384,
        32,
        KdfAlgorithm::HkdfSha384,
        SignatureAlgorithm::EcdsaP384Sha384
    ),
];

/// Look up a suite by its 16-bit identifier.
pub fn suite_by_id(id: u16) -> Result<AlgorithmSuite> {
    CATALOG
        .iter()
        .copied()
        .find(|s| s.suite_id == id)
        .ok_or(Error::UnsupportedFormat)
}
