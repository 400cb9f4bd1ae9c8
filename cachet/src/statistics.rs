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

use std::sync::atomic::{AtomicUsize, Ordering};

/// Operation counters of a [`crate::Group`].
///
/// Counters are updated without taking the cache lock, so a snapshot read while other callers are active may be
/// slightly skewed between fields.
#[derive(Debug, Default)]
pub struct Statistics {
    hit: AtomicUsize,
    miss: AtomicUsize,
    load: AtomicUsize,
    load_error: AtomicUsize,
}

impl Statistics {
    pub(crate) fn record_hit(&self) {
        self.hit.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.miss.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load(&self) {
        self.load.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load_error(&self) {
        self.load_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets served from the cache.
    pub fn hits(&self) -> usize {
        self.hit.load(Ordering::Relaxed)
    }

    /// Gets that missed the cache and went to the loader.
    pub fn misses(&self) -> usize {
        self.miss.load(Ordering::Relaxed)
    }

    /// Successful loader calls.
    pub fn loads(&self) -> usize {
        self.load.load(Ordering::Relaxed)
    }

    /// Failed loader calls.
    pub fn load_errors(&self) -> usize {
        self.load_error.load(Ordering::Relaxed)
    }
}
