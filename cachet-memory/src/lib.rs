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

//! This crate provides the in-memory store of cachet.
//!
//! - [`Lru`] is a single-threaded, weight-bounded store with least-recently-used eviction. Recency is kept by a
//!   doubly linked list whose nodes live in a slab, indexed by key, so add, get and evict are O(1).
//! - [`Cache`] serializes access to one [`Lru`] and allocates it lazily on the first insertion.

mod cache;
mod dlist;
mod lru;
mod slab;

pub use crate::{
    cache::Cache,
    lru::{ArcEventListener, Lru},
};
