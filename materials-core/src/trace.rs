//! Keyring trace: an append-only log of wrapping-key operations.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

pub const ENCRYPTED_DATA_KEY: u32 = 1;
pub const DECRYPTED_DATA_KEY: u32 = 2;
pub const GENERATED_DATA_KEY: u32 = 4;
pub const SIGNED_ENC_CTX: u32 = 8;
pub const VERIFIED_ENC_CTX: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub wrapping_key_namespace: String,
    pub wrapping_key_name: String,
    pub flags: u32,
}

/// Ordered sequence of [`TraceRecord`]s produced by one materials operation.
///
/// Equality is element-wise (flags and both name fields matching) and order
/// is significant — this falls out of deriving `PartialEq` on the
/// underlying `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyringTrace(Vec<TraceRecord>);

impl KeyringTrace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add_record(&mut self, namespace: impl Into<String>, name: impl Into<String>, flags: u32) {
        self.0.push(TraceRecord {
            wrapping_key_namespace: namespace.into(),
            wrapping_key_name: name.into(),
            flags,
        });
        if let Some(last) = self.0.last() {
            tracing::debug!(
                namespace = %last.wrapping_key_namespace,
                name = %last.wrapping_key_name,
                flags = last.flags,
                "keyring trace record"
            );
        }
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
