//! Parsing for AWS KMS key ARNs.
//!
//! A [`KmsKeyring`](crate::keyring::KmsKeyring) resolves its region from a
//! full ARN up front so a [`crate::supplier::ClientSupplier`] can route to
//! the right regional endpoint without contacting a service first. A bare
//! key id or alias carries no region of its own, so it only works when the
//! keyring was built with a configured default region to fall back on.

use crate::error::{KmsKeyringError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyArn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

/// Parse `arn:<partition>:kms:<region>:<account>:key/<id>` (or `alias/...`
/// as the resource). Anything not starting with `arn:` is rejected —
/// [`crate::keyring::KmsKeyring`] never accepts bare key ids or aliases.
pub fn parse(key_id: &str) -> Result<KeyArn> {
    let mut parts = key_id.splitn(6, ':');
    let scheme = parts.next().unwrap_or("");
    if scheme != "arn" {
        return Err(KmsKeyringError::InvalidArn(key_id.into()));
    }
    let partition = parts.next().ok_or_else(|| KmsKeyringError::InvalidArn(key_id.into()))?;
    let service = parts.next().ok_or_else(|| KmsKeyringError::InvalidArn(key_id.into()))?;
    let region = parts.next().ok_or_else(|| KmsKeyringError::InvalidArn(key_id.into()))?;
    let account_id = parts.next().ok_or_else(|| KmsKeyringError::InvalidArn(key_id.into()))?;
    let resource = parts.next().ok_or_else(|| KmsKeyringError::InvalidArn(key_id.into()))?;

    if service != "kms" || region.is_empty() || resource.is_empty() {
        return Err(KmsKeyringError::InvalidArn(key_id.into()));
    }

    Ok(KeyArn {
        partition: partition.into(),
        service: service.into(),
        region: region.into(),
        account_id: account_id.into(),
        resource: resource.into(),
    })
}

/// Convenience accessor used by [`crate::supplier::CachingClientSupplier`].
pub fn region_of(key_id: &str) -> Result<String> {
    parse(key_id).map(|arn| arn.region)
}

/// Resolve the region to route `key_id` to: a full ARN's own region takes
/// precedence, falling back to `default_region` for bare key ids/aliases.
/// Fails only when neither is available.
pub fn resolve_region(key_id: &str, default_region: Option<&str>) -> Result<String> {
    match region_of(key_id) {
        Ok(region) => Ok(region),
        Err(_) => default_region
            .map(String::from)
            .ok_or_else(|| KmsKeyringError::UnresolvedRegion(key_id.into())),
    }
}
