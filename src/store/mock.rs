use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Semaphore;

use crate::errors::StoreError;
use crate::record::{Collection, Record};
use crate::store::Store;

/// An in-memory store for tests.
///
/// Inserts can be made to fail with [`MockStore::set_failing`], and a
/// gated store holds every insert pending until [`MockStore::release`] is
/// called once for it.
#[derive(Default)]
pub struct MockStore {
    records: RwLock<Vec<(Collection, Record)>>,
    attempts: AtomicUsize,
    failing: AtomicBool,
    gate: Option<Semaphore>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose inserts wait to be released.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Lets one pending (or future) insert proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// The number of inserts attempted, including failed and pending ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Every record stored so far, in insertion order.
    pub fn records(&self) -> Vec<(Collection, Record)> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Store for MockStore {
    fn insert(&self, collection: Collection, record: Record) -> BoxFuture<Result<(), StoreError>> {
        mock_insert(self, collection, record).boxed()
    }
}

async fn mock_insert(store: &MockStore, collection: Collection, record: Record) -> Result<(), StoreError> {
    store.attempts.fetch_add(1, Ordering::SeqCst);

    if let Some(gate) = &store.gate {
        let permit = gate.acquire().await.map_err(|_| StoreError::Unavailable {
            reason: "gate closed".to_owned(),
        })?;
        permit.forget();
    }

    if store.failing.load(Ordering::SeqCst) {
        return Err(StoreError::Unavailable {
            reason: "store set to fail".to_owned(),
        });
    }

    store
        .records
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push((collection, record));

    Ok(())
}
