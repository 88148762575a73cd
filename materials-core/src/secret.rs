//! Secret buffer & zeroization.
//!
//! Owned byte buffer whose release path is guaranteed to overwrite its
//! contents — backed by the `zeroize` crate so the wipe cannot be elided by
//! the optimizer.

extern crate alloc;

use alloc::vec::Vec;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret byte buffer — a data key, a derived content key, or an HKDF
/// intermediate. Exclusively owned by the struct that holds it; zeroized on
/// drop and whenever it is explicitly [`clear`](SecretBytes::clear)ed.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Overwrite and truncate to empty.
    pub fn clear(&mut self) {
        self.0.zeroize();
        self.0.clear();
    }

    /// Overwrite the previous contents (zeroizing them first) and replace
    /// with `bytes`.
    pub fn set(&mut self, bytes: &[u8]) {
        self.clear();
        self.0.extend_from_slice(bytes);
    }
}

impl core::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretBytes({} bytes, redacted)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_wipes_and_empties() {
        let mut s = SecretBytes::from_vec(vec![0xAAu8; 8]);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn set_replaces_contents() {
        let mut s = SecretBytes::new();
        s.set(&[1, 2, 3]);
        assert_eq!(s.as_slice(), &[1, 2, 3]);
        s.set(&[9]);
        assert_eq!(s.as_slice(), &[9]);
    }
}
