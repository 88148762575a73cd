//! Client suppliers: how a [`crate::keyring::KmsKeyring`] turns a region
//! into a [`KmsClient`](crate::client::KmsClient).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::client::KmsClient;
use crate::error::{KmsKeyringError, Result};

pub trait ClientSupplier: Send + Sync {
    fn client_for_region(&self, region: &str) -> Result<Arc<dyn KmsClient>>;
}

/// Always returns the same client, regardless of region. Appropriate when
/// every CMK the keyring touches lives behind one endpoint (e.g. a single
/// regional KMS, or a test double).
pub struct SingleClientSupplier {
    client: Arc<dyn KmsClient>,
}

impl SingleClientSupplier {
    pub fn new(client: Arc<dyn KmsClient>) -> Self {
        Self { client }
    }
}

impl ClientSupplier for SingleClientSupplier {
    fn client_for_region(&self, _region: &str) -> Result<Arc<dyn KmsClient>> {
        Ok(self.client.clone())
    }
}

/// Builds a [`KmsClient`] per region on first use via `factory`, then reuses
/// it for every subsequent call.
///
/// Mirrors the lock-then-recheck pattern of a regional client cache: an
/// unlocked read is attempted first, and only a miss takes the lock to
/// build (and recheck for a concurrent winner) before inserting.
pub struct CachingClientSupplier {
    factory: Box<dyn Fn(&str) -> Result<Arc<dyn KmsClient>> + Send + Sync>,
    cache: Mutex<HashMap<String, Arc<dyn KmsClient>>>,
}

impl CachingClientSupplier {
    pub fn new(factory: impl Fn(&str) -> Result<Arc<dyn KmsClient>> + Send + Sync + 'static) -> Self {
        Self { factory: Box::new(factory), cache: Mutex::new(HashMap::new()) }
    }

    fn unlocked_get_client(&self, region: &str) -> Option<Arc<dyn KmsClient>> {
        self.cache.lock().unwrap().get(region).cloned()
    }

    fn locked_get_client(&self, region: &str) -> Result<Arc<dyn KmsClient>> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(existing) = cache.get(region) {
            return Ok(existing.clone());
        }
        let client = (self.factory)(region)?;
        cache.insert(region.to_string(), client.clone());
        Ok(client)
    }
}

impl ClientSupplier for CachingClientSupplier {
    fn client_for_region(&self, region: &str) -> Result<Arc<dyn KmsClient>> {
        if let Some(client) = self.unlocked_get_client(region) {
            return Ok(client);
        }
        self.locked_get_client(region)
    }
}
