//! # kms-keyring
//!
//! A [`materials_core::Keyring`] backed by a remote key-management service
//! (modeled on AWS KMS): region-aware client suppliers, ARN parsing, and a
//! keyring that wraps/unwraps a data key under exactly one CMK.
//!
//! Multi-CMK encryption composes several [`KmsKeyring`]s behind
//! [`materials_core::MultiKeyring`] rather than teaching this crate about a
//! list of key ids directly.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use kms_keyring::{KmsKeyring, MockKmsClient, SingleClientSupplier};
//! use materials_core::{Cmm, DecryptionRequest, DefaultCmm, EncryptionContext, EncryptionRequest};
//!
//! let client = Arc::new(MockKmsClient::new());
//! let supplier = Arc::new(SingleClientSupplier::new(client));
//! let keyring = Arc::new(
//!     KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/abc", supplier).unwrap(),
//! );
//! let cmm = DefaultCmm::new(keyring);
//!
//! let ctx = EncryptionContext::new();
//! let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();
//! let dec_mat = cmm
//!     .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
//!     .unwrap();
//! assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
//! ```

pub mod arn;
pub mod client;
pub mod error;
pub mod keyring;
pub mod supplier;

pub use arn::KeyArn;
pub use client::{DecryptOutcome, EncryptOutcome, GenerateDataKeyOutcome, KmsClient, MockKmsClient};
pub use error::KmsKeyringError;
pub use keyring::KmsKeyring;
pub use supplier::{CachingClientSupplier, ClientSupplier, SingleClientSupplier};
