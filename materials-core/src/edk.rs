//! Encrypted Data Key (EDK) record and list.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::str;

/// A single wrapped copy of the data key.
///
/// `provider_info` interpretation is namespace-specific (see the Raw-AES and
/// KMS keyring modules for their respective layouts).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edk {
    pub provider_namespace: Vec<u8>,
    pub provider_info: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Edk {
    pub fn new(provider_namespace: Vec<u8>, provider_info: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self { provider_namespace, provider_info, ciphertext }
    }

    pub fn provider_namespace_str(&self) -> Option<&str> {
        str::from_utf8(&self.provider_namespace).ok()
    }

    pub fn provider_info_str(&self) -> Option<&str> {
        str::from_utf8(&self.provider_info).ok()
    }

    pub fn is_well_formed(&self) -> bool {
        !self.provider_namespace.is_empty() && !self.ciphertext.is_empty()
    }
}

/// An ordered list of wrapped data keys, appended to in `key_ids`/keyring
/// order on encrypt.
pub type EdkList = Vec<Edk>;
