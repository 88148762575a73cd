//! The `Keyring` contract and the pre/postcondition-checked call wrappers
//! every caller (CMM, multi-keyring) must go through.
//!
//! `spec.md` §4.2 requires precondition violations to skip virtual dispatch
//! entirely — [`checked_on_encrypt`]/[`checked_on_decrypt`] are the only
//! supported way to invoke a [`Keyring`] for exactly that reason: the trait
//! method itself is never called when the precondition fails.

use crate::context::EncryptionContext;
use crate::edk::{Edk, EdkList};
use crate::error::{Error, Result};
use crate::secret::SecretBytes;
use crate::suite::AlgorithmSuite;
use crate::trace::KeyringTrace;

/// A component that wraps/unwraps data keys, possibly delegating to a
/// remote key service.
///
/// Implementations trust that callers only ever reach `on_encrypt`/
/// `on_decrypt` through [`checked_on_encrypt`]/[`checked_on_decrypt`], which
/// enforce the preconditions documented here before dispatching.
pub trait Keyring: Send + Sync {
    /// Precondition (enforced by [`checked_on_encrypt`]): `data_key` is
    /// either empty (this keyring must generate one) or exactly
    /// `suite.data_key_len` bytes.
    ///
    /// Postcondition (enforced by [`checked_on_encrypt`]): on `Ok(())`,
    /// `data_key.len() == suite.data_key_len`, and zero or more EDKs were
    /// *appended* to `edks` (never removed or reordered). Generating a data
    /// key while appending zero EDKs is a postcondition violation.
    fn on_encrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &mut EdkList,
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()>;

    /// Precondition (enforced by [`checked_on_decrypt`]): `data_key` is
    /// empty.
    ///
    /// Postcondition (enforced by [`checked_on_decrypt`]): on `Ok(())`,
    /// either `data_key` remains empty (no candidate EDK was usable — not an
    /// error, the next keyring should try) or `data_key.len() ==
    /// suite.data_key_len`.
    fn on_decrypt(
        &self,
        data_key: &mut SecretBytes,
        edks: &[Edk],
        enc_ctx: &EncryptionContext,
        suite: &AlgorithmSuite,
        trace: &mut KeyringTrace,
    ) -> Result<()>;
}

/// Invoke `keyring.on_encrypt`, enforcing spec.md §4.2's pre/postconditions.
///
/// Returns [`Error::BadState`] without calling `keyring.on_encrypt` at all
/// if the precondition is violated. On a postcondition violation, any EDKs
/// the keyring appended are discarded and the data key is zeroized if this
/// call generated it, before returning [`Error::BadState`].
pub fn checked_on_encrypt(
    keyring: &dyn Keyring,
    data_key: &mut SecretBytes,
    edks: &mut EdkList,
    enc_ctx: &EncryptionContext,
    suite: &AlgorithmSuite,
    trace: &mut KeyringTrace,
) -> Result<()> {
    if !(data_key.is_empty() || data_key.len() == suite.data_key_len) {
        return Err(Error::BadState);
    }
    let was_generating = data_key.is_empty();
    let edks_before = edks.len();

    keyring.on_encrypt(data_key, edks, enc_ctx, suite, trace)?;

    let postcondition_ok = data_key.len() == suite.data_key_len
        && !(was_generating && edks.len() == edks_before);
    if !postcondition_ok {
        edks.truncate(edks_before);
        if was_generating {
            data_key.clear();
        }
        return Err(Error::BadState);
    }
    Ok(())
}

/// Invoke `keyring.on_decrypt`, enforcing spec.md §4.2's pre/postconditions.
///
/// Returns [`Error::BadState`] without calling `keyring.on_decrypt` at all
/// if `data_key` is non-empty on entry. A wrong-length data key on success
/// is a [`Error::BadCiphertext`] (not `BadState` — unlike encrypt, this can
/// be triggered by a malicious remote key service).
pub fn checked_on_decrypt(
    keyring: &dyn Keyring,
    data_key: &mut SecretBytes,
    edks: &[Edk],
    enc_ctx: &EncryptionContext,
    suite: &AlgorithmSuite,
    trace: &mut KeyringTrace,
) -> Result<()> {
    if !data_key.is_empty() {
        return Err(Error::BadState);
    }

    keyring.on_decrypt(data_key, edks, enc_ctx, suite, trace)?;

    if !data_key.is_empty() && data_key.len() != suite.data_key_len {
        data_key.clear();
        return Err(Error::BadCiphertext);
    }
    Ok(())
}
