// Portal data store: typed collections over a blob store

pub mod attendance;
pub mod dashboard;
pub mod results;
pub mod session;
pub mod users;

use crate::core::config::PortalConfig;
use crate::core::error::PortalError;
use crate::stores::blob::{self, encode, BlobStore, Collection};
use crate::stores::memory::MemoryStore;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const USERS_KEY: &str = "portal_users";
pub const ATTENDANCE_KEY: &str = "portal_attendance";
pub const RESULTS_KEY: &str = "portal_results";
pub const CURRENT_USER_KEY: &str = "portal_current_user";

/// Facade over the users, attendance and results collections plus the
/// session pointer.
///
/// Every mutation rewrites a whole collection. Mutations hold `write_lock`
/// for the whole read-modify-write so concurrent callers cannot lose
/// each other's updates.
pub struct PortalStore {
    blobs: Arc<dyn BlobStore>,
    write_lock: Mutex<()>,
    root_admin_id: String,
    good_standing_threshold: u32,
}

impl PortalStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_policy(blobs, &PortalConfig::default())
    }

    pub fn with_policy(blobs: Arc<dyn BlobStore>, policy: &PortalConfig) -> Self {
        Self {
            blobs,
            write_lock: Mutex::new(()),
            root_admin_id: policy.root_admin_id.clone(),
            good_standing_threshold: policy.good_standing_threshold,
        }
    }

    /// Store backed by a fresh `MemoryStore`
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn root_admin_id(&self) -> &str {
        &self.root_admin_id
    }

    pub fn good_standing_threshold(&self) -> u32 {
        self.good_standing_threshold
    }

    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    /// The guarded value is `()`, so a poisoned lock carries no broken state
    pub(crate) fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn has_blob(&self, key: &str) -> Result<bool, PortalError> {
        Ok(self.blobs.contains(key)?)
    }

    /// Missing or malformed collections read as empty. Records that do not
    /// decode are left out.
    pub(crate) fn read_collection<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Vec<T>, PortalError> {
        Ok(self.load(key)?.items)
    }

    fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Collection<T>, PortalError> {
        Ok(blob::read_collection(self.blobs.as_ref(), key)?)
    }

    pub(crate) fn write_value<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PortalError> {
        let text = encode(value).map_err(|source| PortalError::Serialization { key, source })?;
        self.blobs.set(key, &text)?;
        Ok(())
    }

    /// Read `key`, apply `f`, write the collection back. Records that did
    /// not decode are written back untouched; `f` never sees them.
    pub(crate) fn mutate<T, R, F>(&self, key: &'static str, f: F) -> Result<R, PortalError>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock_writes();
        let mut collection: Collection<T> = self.load(key)?;
        let out = f(&mut collection.items);

        let text = collection
            .encode()
            .map_err(|source| PortalError::Serialization { key, source })?;
        self.blobs.set(key, &text)?;
        Ok(out)
    }
}
