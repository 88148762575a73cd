//! Error taxonomy for the KMS client/supplier seam.
//!
//! Kept separate from [`materials_core::Error`]: these are errors the
//! pluggable [`crate::client::KmsClient`]/[`crate::supplier::ClientSupplier`]
//! implementations raise, which [`crate::keyring::KmsKeyring`] folds into
//! `materials_core::Error::KmsFailure` diagnostics at the trait boundary.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KmsKeyringError {
    /// `key_id` is not a full ARN (`arn:partition:kms:region:account:key/...`).
    InvalidArn(String),
    /// No region could be resolved for the given key id and no default
    /// region was configured to fall back to.
    UnresolvedRegion(String),
    /// The client supplier could not produce a client for a region.
    ClientUnavailable(String),
    /// The underlying KMS call failed.
    ServiceError(String),
    /// A KMS response named a different key than the one requested.
    KeyIdMismatch { expected: String, actual: String },
}

impl fmt::Display for KmsKeyringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KmsKeyringError::InvalidArn(id) => write!(f, "not a full KMS key ARN: {id}"),
            KmsKeyringError::UnresolvedRegion(id) => write!(f, "could not resolve region from key id: {id}"),
            KmsKeyringError::ClientUnavailable(region) => write!(f, "no KMS client available for region: {region}"),
            KmsKeyringError::ServiceError(msg) => write!(f, "KMS service error: {msg}"),
            KmsKeyringError::KeyIdMismatch { expected, actual } => {
                write!(f, "KMS response key id mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for KmsKeyringError {}

pub type Result<T> = std::result::Result<T, KmsKeyringError>;
