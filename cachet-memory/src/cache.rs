// Copyright 2026 cachet Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use cachet_common::code::{Key, Value};
use parking_lot::Mutex;

use crate::lru::{ArcEventListener, Lru};

/// Thread-safe wrapper of an [`Lru`] store.
///
/// All operations are serialized by one exclusive lock, reads included, because a hit reorders the recency list.
/// The store itself is only allocated by the first [`Cache::add`].
pub struct Cache<K, V>
where
    K: Key,
    V: Value,
{
    inner: Mutex<Option<Lru<K, V>>>,

    capacity: usize,
    event_listener: Option<ArcEventListener<K, V>>,
}

impl<K, V> Debug for Cache<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

impl<K, V> Cache<K, V>
where
    K: Key,
    V: Value,
{
    /// Create a cache with the given capacity in bytes. `0` means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(None),
            capacity,
            event_listener: None,
        }
    }

    /// Set the listener notified after an entry leaves the cache.
    ///
    /// The listener runs while the cache lock is held.
    pub fn with_event_listener(mut self, event_listener: ArcEventListener<K, V>) -> Self {
        self.event_listener = Some(event_listener);
        self
    }

    /// Insert or update an entry.
    pub fn add(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let lru = inner.get_or_insert_with(|| {
            tracing::trace!("[cache]: initialize lru store, capacity: {}", self.capacity);
            let lru = Lru::new(self.capacity);
            match self.event_listener.clone() {
                Some(listener) => lru.with_event_listener(listener),
                None => lru,
            }
        });
        lru.add(key, value);
    }

    /// Get a clone of the value of the key.
    ///
    /// Returns `None` on a miss, including when nothing has been added yet.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        inner.as_mut()?.get(key).cloned()
    }

    /// Remove the entry of the key.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        inner.as_mut()?.remove(key)
    }

    /// Remove all entries. The store stays allocated.
    pub fn clear(&self) {
        if let Some(lru) = self.inner.lock().as_mut() {
            lru.clear();
        }
    }

    /// Count of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().as_ref().map(|lru| lru.len()).unwrap_or_default()
    }

    /// Returns `true` if the cache holds no entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total weight of all entries.
    pub fn usage(&self) -> usize {
        self.inner.lock().as_ref().map(|lru| lru.usage()).unwrap_or_default()
    }

    /// Weight capacity. `0` means unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once the underlying store has been allocated.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().is_some()
    }
}
