use std::collections::HashMap;

use crate::error::LoaderError;
use crate::record::RecordId;

/// Per-run map from an external entity key to the internal id of the entity
/// already created for it. Guarantees at most one storage-side creation per
/// distinct key per run.
///
/// The miRBase path keys by mature primary identifier and the
/// differential-expression path keys by accession; the two key spaces are
/// disjoint and each path owns its own cache.
#[derive(Debug, Default)]
pub struct DedupCache {
    ids: HashMap<String, RecordId>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached id for `key`, or invokes `factory` to create and
    /// persist the entity, caching the resulting id. A factory failure
    /// propagates and leaves no cache entry behind.
    pub fn get_or_create<F>(&mut self, key: &str, factory: F) -> Result<RecordId, LoaderError>
    where
        F: FnOnce() -> Result<RecordId, LoaderError>,
    {
        if let Some(id) = self.ids.get(key) {
            return Ok(*id);
        }
        let id = factory()?;
        self.ids.insert(key.to_string(), id);
        Ok(id)
    }

    pub fn get(&self, key: &str) -> Option<RecordId> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
