//! Encryption context: an ordered string→string mapping with a canonical,
//! length-prefixed serialization used as AEAD additional authenticated data.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Ordered mapping from UTF-8 key to UTF-8 value.
///
/// Iteration follows insertion order; [`canonical_serialize`] sorts a
/// snapshot lexicographically by key bytes, matching the AAD binding every
/// keyring computes independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncryptionContext {
    entries: Vec<(String, String)>,
}

impl EncryptionContext {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace a value, preserving the key's original insertion
    /// position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical, length-prefixed serialization used as AAD.
    ///
    /// A sorted snapshot: each entry contributes `u16_be(key_len) || key ||
    /// u16_be(value_len) || value`. Fails closed if any key or value exceeds
    /// `u16::MAX` bytes rather than silently truncating.
    pub fn canonical_serialize(&self) -> Result<Vec<u8>> {
        let mut sorted: Vec<&(String, String)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let mut out = Vec::new();
        for (k, v) in sorted {
            push_length_prefixed(&mut out, k.as_bytes())?;
            push_length_prefixed(&mut out, v.as_bytes())?;
        }
        Ok(out)
    }
}

fn push_length_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    if bytes.len() > u16::MAX as usize {
        return Err(Error::BadState);
    }
    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved_on_iter() {
        let mut ctx = EncryptionContext::new();
        ctx.insert("zebra", "1");
        ctx.insert("apple", "2");
        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn canonical_serialize_sorts_by_key_bytes() {
        let mut ctx = EncryptionContext::new();
        ctx.insert("zebra", "1");
        ctx.insert("apple", "2");
        let a = ctx.canonical_serialize().unwrap();

        let mut ctx2 = EncryptionContext::new();
        ctx2.insert("apple", "2");
        ctx2.insert("zebra", "1");
        let b = ctx2.canonical_serialize().unwrap();

        assert_eq!(a, b, "serialization must not depend on insertion order");
    }

    #[test]
    fn replace_keeps_original_position() {
        let mut ctx = EncryptionContext::new();
        ctx.insert("a", "1");
        ctx.insert("b", "2");
        ctx.insert("a", "3");
        let pairs: Vec<(&str, &str)> = ctx.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn empty_context_serializes_to_empty_bytes() {
        let ctx = EncryptionContext::new();
        assert!(ctx.canonical_serialize().unwrap().is_empty());
    }
}
