//! # materials-core
//!
//! The cryptographic materials pipeline at the heart of an envelope-encryption
//! SDK: the algorithm suite catalog, the AES-GCM content cipher, and the
//! Crypto Materials Manager (CMM) / Keyring graph that produces a data key
//! plus its wrapped copies on encrypt and recovers it on decrypt.
//!
//! ## What this crate does NOT do
//!
//! - Message-format framing and session state machines (external collaborator)
//! - Hash/HKDF/HMAC/signature primitives beyond HKDF-based key derivation
//!   (the trailing-signature key pair is a seam — see [`signature`])
//! - Remote key-service wire protocols (see the `kms-keyring` crate, which
//!   only depends on a pluggable [`keyring::Keyring`] implementation here)
//!
//! ## Quick start
//!
//! ```
//! use materials_core::{
//!     DefaultCmm, Cmm, EncryptionContext, EncryptionRequest, DecryptionRequest,
//!     RawAesKeyring,
//! };
//! use std::sync::Arc;
//!
//! let wrapping_key = [0x42u8; 32];
//! let keyring = Arc::new(
//!     RawAesKeyring::new("my-namespace", "my-key", &wrapping_key).unwrap(),
//! );
//! let cmm = DefaultCmm::new(keyring);
//!
//! let ctx = EncryptionContext::new();
//! let enc_mat = cmm
//!     .generate_encryption_materials(&EncryptionRequest::new(&ctx))
//!     .unwrap();
//!
//! let dec_mat = cmm
//!     .decrypt_materials(&DecryptionRequest::new(
//!         enc_mat.suite.suite_id,
//!         &enc_mat.edks,
//!         &enc_mat.encryption_context,
//!     ))
//!     .unwrap();
//!
//! assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub(crate) mod base64;
pub mod cipher;
pub mod cmm;
pub mod context;
pub mod edk;
pub mod error;
pub mod keyring;
pub mod materials;
pub mod multi_keyring;
pub mod raw_aes_keyring;
pub mod secret;
pub mod signature;
pub mod suite;
pub mod trace;

pub use cmm::{Cmm, DefaultCmm, RESERVED_PUBLIC_KEY_CONTEXT_KEY};
pub use context::EncryptionContext;
pub use edk::{Edk, EdkList};
pub use error::{Diagnostics, Error, Result};
pub use keyring::{checked_on_decrypt, checked_on_encrypt, Keyring};
pub use materials::{
    DecryptionMaterials, DecryptionRequest, EncryptionMaterials, EncryptionRequest,
};
pub use multi_keyring::MultiKeyring;
pub use raw_aes_keyring::RawAesKeyring;
pub use secret::SecretBytes;
pub use signature::{RandomSignatureProvider, SignatureProvider, SigningKeyHandle, VerificationKeyHandle};
pub use suite::{AlgorithmSuite, KdfAlgorithm, SignatureAlgorithm, DEFAULT_SUITE_ID, MAX_DATA_KEY_LEN};
pub use trace::{
    KeyringTrace, TraceRecord, DECRYPTED_DATA_KEY, ENCRYPTED_DATA_KEY, GENERATED_DATA_KEY,
    SIGNED_ENC_CTX, VERIFIED_ENC_CTX,
};
