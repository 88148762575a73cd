//! Multi keyring: fans encrypt out to a generator plus child keyrings, and
//! decrypt to whichever member first recovers the data key.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::context::EncryptionContext;
use crate::edk::EdkList;
use crate::error::{Error, Result};
use crate::keyring::{checked_on_decrypt, checked_on_encrypt, Keyring};
use crate::secret::SecretBytes;
use crate::suite::AlgorithmSuite;
use crate::trace::KeyringTrace;

/// Composes a generator keyring (which must produce the data key, or
/// receive an already-generated one) with zero or more child keyrings that
/// each wrap a copy of the same data key.
///
/// On decrypt, members are tried in order; the first to recover the data
/// key wins. A [`Error::BadState`] from any member is fatal and propagates
/// immediately — it signals a programming error, not a missing key, and no
/// other member's answer can be trusted once the invariant already broke.
pub struct MultiKeyring {
    generator: Option<Arc<dyn Keyring>>,
    children: Vec<Arc<dyn Keyring>>,
}

impl MultiKeyring {
    pub fn new(generator: Option<Arc<dyn Keyring>>, children: Vec<Arc<dyn Keyring>>) -> Self {
        Self { generator, children }
    }

    pub fn with_generator(generator: Arc<dyn Keyring>) -> Self {
        Self { generator: Some(generator), children: Vec::new() }
    }

    pub fn add_child(mut self, child: Arc<dyn Keyring>) -> Self {
        self.children.push(child);
        self
    }

    fn members(&self) -> impl Iterator<Item = &Arc<dyn Keyring>> {
        self.generator.iter().chain(self.children.iter())
    }
}

impl Keyring for MultiKeyring {
    fn on_encrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &mut EdkList,
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()> {
        if data_key.is_empty() {
            let generator = self.generator.as_ref().ok_or(Error::BadState)?;
            checked_on_encrypt(generator.as_ref(), data_key, edks, enc_ctx, suite, trace)?;
        }

        for child in &self.children {
            checked_on_encrypt(child.as_ref(), data_key, edks, enc_ctx, suite, trace)?;
        }
        Ok(())
    }

    fn on_decrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &[crate::edk::Edk],
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()> {
        let mut diagnostics: Vec<alloc::string::String> = Vec::new();

        for member in self.members() {
            match checked_on_decrypt(member.as_ref(), data_key, edks, enc_ctx, suite, trace) {
                Ok(()) => {
                    if !data_key.is_empty() {
                        return Ok(());
                    }
                }
                Err(Error::BadState) => return Err(Error::BadState),
                Err(other) => diagnostics.push(alloc::format!("{}", other)),
            }
        }
        let _ = diagnostics; // surfaced by the CMM's CannotDecrypt, not this keyring
        Ok(())
    }
}
