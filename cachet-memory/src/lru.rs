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

use std::{borrow::Borrow, fmt::Debug, hash::Hash, sync::Arc};

use cachet_common::{
    code::{Key, Value},
    event::{Event, EventListener},
    strict_assert, strict_assert_eq,
};
use hashbrown::HashMap;

use crate::{dlist::SlabLinkedList, slab::Token};

/// Shared eviction listener of an [`Lru`].
pub type ArcEventListener<K, V> = Arc<dyn EventListener<Key = K, Value = V>>;

struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V>
where
    K: Key,
    V: Value,
{
    fn weight(&self) -> usize {
        self.key.weight() + self.value.weight()
    }
}

/// A weight-bounded store with least-recently-used eviction.
///
/// Every entry is charged `key.weight() + value.weight()`. After each [`Lru::add`], entries are evicted from the
/// least-recently-used end until the usage fits the capacity again. A capacity of `0` disables eviction.
///
/// [`Lru::get`] refreshes recency and thus needs `&mut self`. Wrap the store with [`crate::Cache`] to share it
/// between threads.
pub struct Lru<K, V>
where
    K: Key,
    V: Value,
{
    capacity: usize,
    usage: usize,

    /// Head is the most-recently-used entry, tail the least-recently-used one.
    list: SlabLinkedList<Entry<K, V>>,
    index: HashMap<K, Token>,

    event_listener: Option<ArcEventListener<K, V>>,
}

impl<K, V> Debug for Lru<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lru")
            .field("capacity", &self.capacity)
            .field("usage", &self.usage)
            .field("len", &self.len())
            .finish()
    }
}

impl<K, V> Lru<K, V>
where
    K: Key,
    V: Value,
{
    /// Create an empty store with the given capacity in bytes. `0` means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            usage: 0,
            list: SlabLinkedList::new(),
            index: HashMap::new(),
            event_listener: None,
        }
    }

    /// Set the listener notified after an entry leaves the store.
    pub fn with_event_listener(mut self, event_listener: ArcEventListener<K, V>) -> Self {
        self.event_listener = Some(event_listener);
        self
    }

    /// Insert or update an entry and mark it as the most recently used one.
    ///
    /// Evicts least-recently-used entries afterwards until the usage fits the capacity. If the entry alone outweighs
    /// the capacity, it is evicted as well.
    pub fn add(&mut self, key: K, value: V) {
        match self.index.get(&key).copied() {
            Some(token) => {
                self.list.move_to_front(token);
                let Some(entry) = self.list.get_mut(token) else {
                    unreachable!("indexed token must refer to a linked entry")
                };
                let old = std::mem::replace(&mut entry.value, value);
                self.usage = self.usage - old.weight() + entry.value.weight();
            }
            None => {
                let entry = Entry { key: key.clone(), value };
                self.usage += entry.weight();
                let token = self.list.push_front(entry);
                self.index.insert(key, token);
            }
        }

        while self.capacity != 0 && self.usage > self.capacity {
            if self.remove_oldest().is_none() {
                break;
            }
        }

        strict_assert_eq!(self.index.len(), self.list.len());
    }

    /// Get the value of the key and mark the entry as the most recently used one.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let token = *self.index.get(key)?;
        self.list.move_to_front(token);
        self.list.get(token).map(|entry| &entry.value)
    }

    /// Get the value of the key without touching the recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let token = *self.index.get(key)?;
        self.list.get(token).map(|entry| &entry.value)
    }

    /// Returns `true` if the key is in the store. The recency order is not touched.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Evict the least-recently-used entry.
    ///
    /// The event listener is notified after the entry has been detached. Returns `None` on an empty store.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        let token = self.index.remove(&entry.key);
        strict_assert!(token.is_some());
        self.usage -= entry.weight();

        tracing::trace!(
            "[lru]: evict entry, key: {:?}, weight: {}, usage: {}/{}",
            entry.key,
            entry.weight(),
            self.usage,
            self.capacity
        );

        self.notify(Event::Evict, &entry);
        Some((entry.key, entry.value))
    }

    /// Remove the entry of the key.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let token = self.index.remove(key)?;
        let entry = self.list.remove(token)?;
        self.usage -= entry.weight();

        self.notify(Event::Remove, &entry);
        Some(entry.value)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        let list = std::mem::take(&mut self.list);
        self.index.clear();
        self.usage = 0;

        if let Some(listener) = self.event_listener.as_ref() {
            for entry in list.iter() {
                listener.on_leave(Event::Clear, &entry.key, &entry.value);
            }
        }
    }

    /// Iterate entries from the most recently used to the least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Count of entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the store holds no entry.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Total weight of all entries.
    pub fn usage(&self) -> usize {
        self.usage
    }

    /// Weight capacity. `0` means unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn notify(&self, reason: Event, entry: &Entry<K, V>) {
        if let Some(listener) = self.event_listener.as_ref() {
            listener.on_leave(reason, &entry.key, &entry.value);
        }
    }
}
