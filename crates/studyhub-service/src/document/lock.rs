//! In-process mutual exclusion per document.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use studyhub_core::types::DocumentId;

type LockMap = DashMap<DocumentId, Arc<Mutex<()>>>;

/// Registry of per-document locks.
///
/// Rename, move and delete of the same document run one at a time;
/// different documents never contend. Entries are dropped once nobody
/// holds or waits for them.
#[derive(Debug, Clone, Default)]
pub struct DocumentLocks {
    inner: Arc<LockMap>,
}

impl DocumentLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `doc_id`.
    pub async fn acquire(&self, doc_id: DocumentId) -> DocumentLockGuard {
        let lock = self.inner.entry(doc_id).or_default().clone();
        let guard = lock.lock_owned().await;
        DocumentLockGuard {
            guard: Some(guard),
            doc_id,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of documents with a live lock entry.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no lock entries are live.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Exclusive access to one document; released on drop.
#[derive(Debug)]
pub struct DocumentLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    doc_id: DocumentId,
    registry: Arc<LockMap>,
}

impl Drop for DocumentLockGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map itself still references an idle lock.
        self.registry
            .remove_if(&self.doc_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_document_is_serialized() {
        let locks = DocumentLocks::new();
        let first = locks.acquire(DocumentId(1)).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(DocumentId(1)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(first);
        contender.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_documents_do_not_contend() {
        let locks = DocumentLocks::new();
        let _a = locks.acquire(DocumentId(1)).await;
        let b = tokio::time::timeout(Duration::from_secs(1), locks.acquire(DocumentId(2))).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }
}
