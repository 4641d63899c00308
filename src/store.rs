//! Comparison result store
//!
//! Bounded in-memory cache of finished comparisons, keyed by a generated
//! comparison id. The id is returned from `POST /compare` and passed back
//! for report download and source previews, so concurrent comparisons never
//! clobber each other (no process-wide "last result" singleton).
//!
//! Entries are immutable once inserted; eviction is LRU when the store is
//! full, which doubles as cleanup for abandoned comparisons.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::compare::{ComparisonResult, Side};

/// Everything retained for one finished comparison.
pub struct StoredComparison {
    pub result: ComparisonResult,
    /// Pre-built summary PDF
    pub report: Vec<u8>,
    /// Original inputs, kept for the preview endpoints
    pub before_pdf: Vec<u8>,
    pub after_pdf: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl StoredComparison {
    /// Source bytes for one side.
    pub fn pdf_for(&self, side: Side) -> &[u8] {
        match side {
            Side::Before => &self.before_pdf,
            Side::After => &self.after_pdf,
        }
    }
}

/// Thread-safe LRU store of comparisons.
#[derive(Clone)]
pub struct ComparisonStore {
    inner: Arc<Mutex<LruCache<Uuid, Arc<StoredComparison>>>>,
}

impl ComparisonStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Store a finished comparison under a fresh id.
    pub fn insert(&self, comparison: StoredComparison) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().put(id, Arc::new(comparison));
        id
    }

    /// Look up a comparison, refreshing its recency.
    pub fn get(&self, id: &Uuid) -> Option<Arc<StoredComparison>> {
        self.inner.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn stored() -> StoredComparison {
        StoredComparison {
            result: ComparisonResult {
                total_pages: 1,
                changed_pages: vec![],
                text_differences: BTreeMap::new(),
                confidence: 100.0,
            },
            report: b"%PDF-report".to_vec(),
            before_pdf: b"%PDF-before".to_vec(),
            after_pdf: b"%PDF-after".to_vec(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = ComparisonStore::new(4);
        let id = store.insert(stored());
        let entry = store.get(&id).unwrap();
        assert_eq!(entry.report, b"%PDF-report");
        assert_eq!(entry.pdf_for(Side::Before), b"%PDF-before");
        assert_eq!(entry.pdf_for(Side::After), b"%PDF-after");
    }

    #[test]
    fn test_unknown_id_misses() {
        let store = ComparisonStore::new(4);
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let store = ComparisonStore::new(2);
        let first = store.insert(stored());
        let _second = store.insert(stored());
        // Touch the first entry so the second becomes eviction candidate
        assert!(store.get(&first).is_some());
        let _third = store.insert(stored());

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_some());
    }

    #[test]
    fn test_ids_are_unique() {
        let store = ComparisonStore::new(8);
        let a = store.insert(stored());
        let b = store.insert(stored());
        assert_ne!(a, b);
    }
}
