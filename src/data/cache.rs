//! Caller-owned dataset cache keyed by source identity.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::data::LoadOutcome;
use crate::domain::{Source, SourceKey};

#[derive(Debug)]
struct Entry {
    outcome: LoadOutcome,
    loaded_at: Instant,
}

/// Loaded datasets, reused until they expire or are cleared.
///
/// Loads that could not reach their source are never stored, so the next
/// request retries. The lock is released while loading; if two loads of the
/// same key race, the later insert wins and both callers see a whole dataset.
#[derive(Debug)]
pub struct DatasetCache {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<SourceKey, Entry>>,
}

impl DatasetCache {
    /// `ttl = None` keeps entries until `invalidate`/`clear`.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_load<F>(&self, source: &Source, load: F) -> LoadOutcome
    where
        F: FnOnce(&Source) -> LoadOutcome,
    {
        let key = source.key();
        if let Some(hit) = self.lookup(&key) {
            log::debug!("cache hit for {key}");
            return hit;
        }

        let outcome = load(source);
        if !outcome.is_unavailable() {
            self.lock().insert(
                key,
                Entry {
                    outcome: outcome.clone(),
                    loaded_at: Instant::now(),
                },
            );
        }
        outcome
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &SourceKey) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lookup(&self, key: &SourceKey) -> Option<LoadOutcome> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self.ttl.is_some_and(|ttl| entry.loaded_at.elapsed() >= ttl),
        };
        if expired {
            log::debug!("cache entry for {key} expired");
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.outcome.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SourceKey, Entry>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
