//! In-memory member directory keyed by member identifier.
//!
//! Uses `arc-swap` for lock-free reads on the validation path; the refresh
//! task swaps in a complete new map.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use super::{MemberDirectory, MemberRecord};

/// Shared, lock-free map of members keyed by identifier.
#[derive(Clone, Debug)]
pub struct FileDirectory {
    inner: Arc<ArcSwap<HashMap<String, MemberRecord>>>,
}

impl FileDirectory {
    /// Create a new, empty [`FileDirectory`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(HashMap::new()))),
        }
    }

    /// Atomically replace all members.
    ///
    /// Later records win when identifiers repeat.
    pub fn replace_all(&self, members: Vec<MemberRecord>) {
        let map: HashMap<String, MemberRecord> =
            members.into_iter().map(|m| (m.id.clone(), m)).collect();
        self.inner.store(Arc::new(map));
    }
}

impl MemberDirectory for FileDirectory {
    fn find(&self, id: &str) -> Option<MemberRecord> {
        self.inner.load().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.inner.load().len()
    }
}

impl Default for FileDirectory {
    fn default() -> Self {
        Self::new()
    }
}
