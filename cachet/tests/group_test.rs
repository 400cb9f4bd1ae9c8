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

//! End-to-end tests of groups, loaders and the registry.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Barrier,
    },
    thread,
};

use cachet::{ByteView, Error, ErrorKind, Event, FnEventListener, GroupBuilder, Loader, Registry};
use itertools::Itertools;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug)]
struct DbError(String);

impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "db error: {}", self.0)
    }
}

impl std::error::Error for DbError {}

/// A slow source of truth that counts lookups per key.
struct SlowDb {
    rows: HashMap<&'static str, &'static str>,
    lookups: Mutex<HashMap<String, usize>>,
}

impl SlowDb {
    fn scores() -> Arc<Self> {
        Arc::new(Self {
            rows: [("Tom", "630"), ("Jack", "589"), ("Sam", "567")].into_iter().collect(),
            lookups: Mutex::new(HashMap::new()),
        })
    }

    fn lookups(&self, key: &str) -> usize {
        self.lookups.lock().get(key).copied().unwrap_or_default()
    }

    fn loader(self: &Arc<Self>) -> impl Loader {
        let db = self.clone();
        move |key: &str| {
            tracing::info!("[SlowDB] search key {key}");
            *db.lookups.lock().entry(key.to_string()).or_default() += 1;
            match db.rows.get(key) {
                Some(row) => Ok(row.as_bytes().to_vec()),
                None => Err(Error::not_found(key).with_source(DbError(format!("{key} not exist")))),
            }
        }
    }
}

#[test_log::test]
fn test_scores() {
    let db = SlowDb::scores();
    let registry = Registry::new();
    let scores = registry.new_group("scores", 2 << 10, db.loader());

    for (name, score) in [("Tom", "630"), ("Jack", "589"), ("Sam", "567")] {
        let view = scores.get(name).unwrap();
        assert_eq!(view.to_string(), score);
        assert_eq!(db.lookups(name), 1);

        let view = scores.get(name).unwrap();
        assert_eq!(view.to_string(), score);
        assert_eq!(db.lookups(name), 1, "cache miss for {name}");
    }

    let err = scores.get("unknown").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Loader);
    assert_eq!(err.downcast_ref::<DbError>().unwrap().0, "unknown not exist");
    assert!(scores.get("unknown").is_err());
    assert_eq!(db.lookups("unknown"), 2);

    let stats = scores.statistics();
    assert_eq!(stats.hits(), 3);
    assert_eq!(stats.misses(), 5);
    assert_eq!(stats.loads(), 3);
    assert_eq!(stats.load_errors(), 2);
}

#[test_log::test]
fn test_empty_key_skips_loader() {
    let db = SlowDb::scores();
    let registry = Registry::new();
    let scores = registry.new_group("scores", 0, db.loader());

    let err = scores.get("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
    assert!(db.lookups.lock().is_empty());
}

#[test_log::test]
fn test_returned_views_are_isolated() {
    let registry = Registry::new();
    let group = registry.new_group("bytes", 0, |key: &str| Ok::<_, Error>(key.as_bytes().to_vec()));

    let view = group.get("abc").unwrap();
    let mut copy = view.byte_slice();
    copy[0] = b'x';
    assert_eq!(group.get("abc").unwrap(), ByteView::from("abc"));
    assert_eq!(view.as_str(), Some("abc"));
}

#[test_log::test]
fn test_concurrent_misses_each_call_loader() {
    const THREADS: usize = 8;

    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));
    let c = calls.clone();
    let b = barrier.clone();
    // Every loader call waits for the others, so no get can be served by a populated entry.
    let group = Arc::new(
        GroupBuilder::new("scores")
            .with_loader(move |_: &str| {
                c.fetch_add(1, Ordering::SeqCst);
                b.wait();
                Ok::<_, Error>(b"630".to_vec())
            })
            .build(),
    );

    let handles = (0..THREADS)
        .map(|_| {
            let group = group.clone();
            thread::spawn(move || group.get("Tom").unwrap())
        })
        .collect_vec();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_str(), Some("630"));
    }

    assert_eq!(calls.load(Ordering::SeqCst), THREADS);
    assert_eq!(group.statistics().misses(), THREADS);
    assert_eq!(group.cache_len(), 1);

    group.get("Tom").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), THREADS);
}

#[test_log::test]
fn test_groups_are_isolated() {
    let registry = Registry::new();
    registry.new_group("upper", 0, |key: &str| Ok::<_, Error>(key.to_uppercase().into_bytes()));
    registry.new_group("lower", 0, |key: &str| Ok::<_, Error>(key.to_lowercase().into_bytes()));

    let upper = registry.lookup("upper").unwrap();
    let lower = registry.lookup("lower").unwrap();
    assert_eq!(upper.get("Key").unwrap().to_string(), "KEY");
    assert_eq!(lower.get("Key").unwrap().to_string(), "key");
    assert_eq!(upper.cache_len(), 1);
    assert_eq!(lower.cache_len(), 1);
    assert!(registry.lookup("other").is_none());
}

#[test_log::test]
fn test_eviction_events() {
    let evicted = Arc::new(Mutex::new(vec![]));
    let e = evicted.clone();
    let registry = Registry::new();
    // Keys and values are 2 bytes each, so 3 entries fit.
    let group = registry.register(
        GroupBuilder::new("tiny")
            .with_capacity(12)
            .with_loader(|key: &str| Ok::<_, Error>(key.as_bytes().to_vec()))
            .with_event_listener(Arc::new(FnEventListener::new(
                move |reason, key: &String, _: &ByteView| {
                    e.lock().push((reason, key.clone()));
                },
            ))),
    );

    for key in ["k1", "k2", "k3", "k1", "k4", "k5"] {
        group.get(key).unwrap();
    }
    assert_eq!(
        *evicted.lock(),
        vec![(Event::Evict, "k2".to_string()), (Event::Evict, "k3".to_string())]
    );
    assert_eq!(group.cache_len(), 3);
    assert_eq!(group.cache_usage(), 12);
}

#[test_log::test]
fn test_concurrent_random_gets() {
    const THREADS: u64 = 8;
    const OPS: usize = 2000;
    const KEYS: u64 = 64;

    let registry = Arc::new(Registry::new());
    registry.new_group("squares", 256, |key: &str| -> cachet::Result<Vec<u8>> {
        let n = key.parse::<u64>().map_err(|e| Error::new(ErrorKind::External, "bad key").with_source(e))?;
        Ok((n * n).to_string().into_bytes())
    });

    let handles = (0..THREADS)
        .map(|seed| {
            let registry = registry.clone();
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                let group = registry.lookup("squares").unwrap();
                for _ in 0..OPS {
                    let n = rng.random_range(0..KEYS);
                    let view = group.get(&n.to_string()).unwrap();
                    assert_eq!(view.to_string(), (n * n).to_string());
                }
            })
        })
        .collect_vec();
    for handle in handles {
        handle.join().unwrap();
    }

    let group = registry.lookup("squares").unwrap();
    assert!(group.cache_usage() <= 256);
    let stats = group.statistics();
    assert_eq!(stats.hits() + stats.misses(), THREADS as usize * OPS);
    assert_eq!(stats.loads(), stats.misses());

    let err = group.get("not a number").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::External);
    assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
}
