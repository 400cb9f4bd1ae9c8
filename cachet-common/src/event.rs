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

use crate::code::{Key, Value};

/// Event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Cache eviction on insertion.
    Evict,
    /// Cache remove.
    Remove,
    /// Cache clear.
    Clear,
}

/// Trait for the customized event listener.
///
/// The listener is called after the entry has been detached from the cache. It must not call back into the cache
/// it listens on.
pub trait EventListener: Send + Sync + 'static {
    /// Associated key type.
    type Key;
    /// Associated value type.
    type Value;

    /// Called when a cache entry leaves the in-memory cache with the reason.
    fn on_leave(&self, reason: Event, key: &Self::Key, value: &Self::Value)
    where
        Self::Key: Key,
        Self::Value: Value;
}

/// Adapter that turns a closure into an [`EventListener`].
pub struct FnEventListener<K, V, F>
where
    F: Fn(Event, &K, &V) + Send + Sync + 'static,
{
    f: F,
    _marker: std::marker::PhantomData<fn(&K, &V)>,
}

impl<K, V, F> FnEventListener<K, V, F>
where
    F: Fn(Event, &K, &V) + Send + Sync + 'static,
{
    /// Wrap the closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<K, V, F> EventListener for FnEventListener<K, V, F>
where
    K: 'static,
    V: 'static,
    F: Fn(Event, &K, &V) + Send + Sync + 'static,
{
    type Key = K;
    type Value = V;

    fn on_leave(&self, reason: Event, key: &Self::Key, value: &Self::Value)
    where
        Self::Key: Key,
        Self::Value: Value,
    {
        (self.f)(reason, key, value)
    }
}
