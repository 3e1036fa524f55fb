//! Path-keyed cache of reconciled cabinets.
//!
//! Loading a cabinet reads its folder and description, so callers that
//! show many cabinets keep results here. The first detail stored for a path
//! stays until that path is invalidated.
//!
//! # Example
//!
//! ```ignore
//! use cabinetry::registry::DetailCache;
//!
//! let mut cache = DetailCache::new();
//! let detail = cache.get_or_load(&path, |p| load_cabinet(p, None, &options));
//! println!("{}", detail.summary());
//!
//! // After the folder changes on disk:
//! cache.invalidate(&path);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::validation::CabinetDetail;

/// Cache of cabinet details keyed by cabinet path.
#[derive(Debug, Default)]
pub struct DetailCache {
    details: HashMap<PathBuf, CabinetDetail>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached detail.
    pub fn get(&self, path: &Path) -> Option<&CabinetDetail> {
        self.details.get(path)
    }

    /// Store a detail unless one is already cached for `path`.
    ///
    /// Returns `true` if the detail was stored.
    pub fn put(&mut self, path: impl Into<PathBuf>, detail: CabinetDetail) -> bool {
        let path = path.into();
        if self.details.contains_key(&path) {
            log::trace!("cache already holds {}", path.display());
            return false;
        }
        self.details.insert(path, detail);
        true
    }

    /// Return the cached detail, loading and storing it on a miss.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        load: impl FnOnce(&Path) -> CabinetDetail,
    ) -> &CabinetDetail {
        self.details
            .entry(path.to_path_buf())
            .or_insert_with(|| load(path))
    }

    /// Drop the detail for `path`. Returns whether one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.details.remove(path).is_some()
    }

    /// Drop every cached detail.
    pub fn clear(&mut self) {
        self.details.clear();
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Cached cabinet paths.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.details.keys().map(|p| p.as_path())
    }

    /// Cached details.
    pub fn details(&self) -> impl Iterator<Item = &CabinetDetail> {
        self.details.values()
    }
}
