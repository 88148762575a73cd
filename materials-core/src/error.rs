//! Unified error taxonomy for the materials pipeline.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Diagnostic messages accumulated while scanning candidate EDKs or CMKs.
///
/// Never contains secret bytes — only provider/namespace identifiers and
/// upstream error text, suitable for logging.
pub type Diagnostics = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown algorithm suite id.
    UnsupportedFormat,
    /// Tag verification failed, malformed provider_info, or a missing
    /// signing key in the encryption context.
    BadCiphertext,
    /// No keyring recovered the data key.
    CannotDecrypt(Diagnostics),
    /// A remote key-service call failed, or returned a key id mismatch.
    KmsFailure(Diagnostics),
    /// Pre/postcondition violation — a programming error, never triggered
    /// by attacker-controlled input alone.
    BadState,
    /// Underlying cryptographic primitive failed.
    CryptoError,
    /// Allocation failure.
    OutOfMemory,
}

impl Error {
    pub fn cannot_decrypt() -> Self {
        Error::CannotDecrypt(Diagnostics::new())
    }

    pub fn kms_failure() -> Self {
        Error::KmsFailure(Diagnostics::new())
    }

    pub fn diagnostics(&self) -> &[String] {
        match self {
            Error::CannotDecrypt(d) | Error::KmsFailure(d) => d,
            _ => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFormat => write!(f, "unsupported algorithm suite"),
            Error::BadCiphertext => write!(f, "bad ciphertext"),
            Error::CannotDecrypt(diag) => {
                write!(f, "no keyring could decrypt the data key")?;
                for msg in diag {
                    write!(f, "; {}", msg)?;
                }
                Ok(())
            }
            Error::KmsFailure(diag) => {
                write!(f, "kms keyring failure")?;
                for msg in diag {
                    write!(f, "; {}", msg)?;
                }
                Ok(())
            }
            Error::BadState => write!(f, "keyring pre/postcondition violation"),
            Error::CryptoError => write!(f, "cryptographic primitive failure"),
            Error::OutOfMemory => write!(f, "allocation failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
