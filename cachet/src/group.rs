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

use std::{fmt::Debug, sync::Arc};

use cachet_common::error::{Error, ErrorKind, Result};
use cachet_memory::{ArcEventListener, Cache};
use serde::{Deserialize, Serialize};

use crate::{loader::Loader, statistics::Statistics, view::ByteView};

/// Serializable configuration of a [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Name of the group, unique within a [`crate::Registry`].
    pub name: String,
    /// Cache capacity in bytes, counting both keys and values. `0` means unbounded.
    #[serde(default)]
    pub capacity: usize,
}

impl GroupConfig {
    /// Check the config values.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::new(ErrorKind::Config, "group name must not be empty"));
        }
        Ok(())
    }
}

/// Builder of a [`Group`].
pub struct GroupBuilder {
    name: String,
    capacity: usize,
    loader: Option<Arc<dyn Loader>>,
    event_listener: Option<ArcEventListener<String, ByteView>>,
}

impl Debug for GroupBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupBuilder")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl GroupBuilder {
    /// Start building a group with the given name, an unbounded cache and no loader.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: 0,
            loader: None,
            event_listener: None,
        }
    }

    /// Start building a group from a validated config.
    pub fn from_config(config: GroupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.name).with_capacity(config.capacity))
    }

    /// Set the cache capacity in bytes. `0` means unbounded.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the loader invoked on cache misses.
    pub fn with_loader(mut self, loader: impl Loader) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Set the listener notified when an entry leaves the cache of the group.
    pub fn with_event_listener(mut self, event_listener: ArcEventListener<String, ByteView>) -> Self {
        self.event_listener = Some(event_listener);
        self
    }

    /// Build the group.
    ///
    /// # Panics
    ///
    /// Panics if no loader has been set. A group without a loader is a programming error.
    pub fn build(self) -> Group {
        let Some(loader) = self.loader else {
            panic!("group {:?} is built without a loader", self.name);
        };

        let cache = Cache::new(self.capacity);
        let cache = match self.event_listener {
            Some(listener) => cache.with_event_listener(listener),
            None => cache,
        };

        Group {
            name: self.name,
            loader,
            cache,
            statistics: Statistics::default(),
        }
    }
}

/// A named cache namespace with its own loader and capacity.
///
/// A get is served from the cache on a hit. On a miss the loader is called with no lock held and its output is copied
/// into a [`ByteView`], cached and returned. Concurrent misses on the same key are not coalesced, each of them calls
/// the loader.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    cache: Cache<String, ByteView>,
    statistics: Statistics,
}

impl Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl Group {
    /// Get the value of the key, loading it on a miss.
    ///
    /// Fails with [`ErrorKind::InvalidKey`] on an empty key. A loader error is returned as is, and nothing is
    /// cached for the key.
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(Error::empty_key());
        }

        if let Some(value) = self.cache.get(key) {
            self.statistics.record_hit();
            tracing::debug!("[group]: hit, group: {}, key: {}", self.name, key);
            return Ok(value);
        }

        self.statistics.record_miss();
        tracing::debug!("[group]: miss, group: {}, key: {}", self.name, key);
        self.load(key)
    }

    fn load(&self, key: &str) -> Result<ByteView> {
        let bytes = self.loader.load(key).inspect_err(|e| {
            self.statistics.record_load_error();
            tracing::debug!("[group]: load failed, group: {}, key: {}, error: {}", self.name, key, e);
        })?;
        self.statistics.record_load();

        let value = ByteView::copy_from_slice(&bytes);
        self.populate(key, value.clone());
        Ok(value)
    }

    fn populate(&self, key: &str, value: ByteView) {
        self.cache.add(key.to_string(), value);
    }

    /// Name of the group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cache capacity in bytes. `0` means unbounded.
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Operation counters of the group.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Count of cached entries.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Cached bytes, counting both keys and values.
    pub fn cache_usage(&self) -> usize {
        self.cache.usage()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cachet_common::event::{Event, FnEventListener};
    use parking_lot::Mutex;

    use super::*;

    fn scores(calls: Arc<AtomicUsize>) -> impl Loader {
        move |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            match key {
                "Tom" => Ok(b"630".to_vec()),
                "Jack" => Ok(b"589".to_vec()),
                "Sam" => Ok(b"567".to_vec()),
                _ => Err(Error::not_found(key)),
            }
        }
    }

    #[test_log::test]
    fn test_hit_after_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = GroupBuilder::new("scores")
            .with_capacity(2 << 10)
            .with_loader(scores(calls.clone()))
            .build();

        assert_eq!(group.get("Tom").unwrap().as_str(), Some("630"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(group.get("Tom").unwrap().as_str(), Some("630"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(group.statistics().hits(), 1);
        assert_eq!(group.statistics().misses(), 1);
        assert_eq!(group.statistics().loads(), 1);
        assert_eq!(group.cache_len(), 1);
        assert_eq!(group.cache_usage(), 3 + 3);
    }

    #[test_log::test]
    fn test_loader_error_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = GroupBuilder::new("scores").with_loader(scores(calls.clone())).build();

        let err = group.get("Unknown").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Loader);
        assert_eq!(err.message(), "record not found");
        assert_eq!(err.context(), &vec![("key", "Unknown".to_string())]);

        // Failures are retried by the next get only.
        assert!(group.get("Unknown").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(group.statistics().load_errors(), 2);
        assert_eq!(group.cache_len(), 0);
    }

    #[test]
    fn test_empty_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = GroupBuilder::new("scores").with_loader(scores(calls.clone())).build();

        let err = group.get("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(group.statistics().misses(), 0);
        assert_eq!(group.cache_len(), 0);
    }

    #[test]
    #[should_panic(expected = "built without a loader")]
    fn test_build_without_loader() {
        GroupBuilder::new("orphan").with_capacity(1024).build();
    }

    #[test]
    fn test_loader_reloads_after_eviction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let evicted = Arc::new(Mutex::new(vec![]));
        let e = evicted.clone();
        // Tom and Sam weigh 6 bytes each, Jack weighs 7.
        let group = GroupBuilder::new("scores")
            .with_capacity(13)
            .with_loader(scores(calls.clone()))
            .with_event_listener(Arc::new(FnEventListener::new(
                move |reason, key: &String, value: &ByteView| {
                    e.lock().push((reason, key.clone(), value.clone()));
                },
            )))
            .build();

        group.get("Tom").unwrap();
        group.get("Sam").unwrap();
        group.get("Tom").unwrap();
        group.get("Jack").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *evicted.lock(),
            vec![(Event::Evict, "Sam".to_string(), ByteView::from("567"))]
        );

        assert_eq!(group.cache_usage(), 13);

        assert_eq!(group.get("Sam").unwrap().as_str(), Some("567"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            evicted.lock().last(),
            Some(&(Event::Evict, "Tom".to_string(), ByteView::from("630")))
        );
    }

    #[test]
    fn test_config() {
        let config: GroupConfig = serde_json::from_str(r#"{ "name": "scores", "capacity": 2048 }"#).unwrap();
        let group = GroupBuilder::from_config(config.clone())
            .unwrap()
            .with_loader(|_: &str| Ok::<_, Error>(vec![]))
            .build();
        assert_eq!(group.name(), "scores");
        assert_eq!(group.capacity(), 2048);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GroupConfig>(&json).unwrap(), config);

        let config: GroupConfig = serde_json::from_str(r#"{ "name": "unbounded" }"#).unwrap();
        assert_eq!(config.capacity, 0);

        let err = GroupBuilder::from_config(GroupConfig {
            name: String::new(),
            capacity: 1,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
