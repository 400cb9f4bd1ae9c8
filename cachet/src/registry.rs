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

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::{
    group::{Group, GroupBuilder},
    loader::Loader,
};

/// Name-to-group table.
///
/// Lookups share a read lock and registrations take the write lock. Registering a name that already exists replaces
/// the previous group, handles to the old one stay valid but are no longer reachable by name.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group with the given name, capacity in bytes and loader, and register it.
    pub fn new_group(&self, name: impl Into<String>, capacity: usize, loader: impl Loader) -> Arc<Group> {
        self.register(GroupBuilder::new(name).with_capacity(capacity).with_loader(loader))
    }

    /// Build the group and register it under its name.
    ///
    /// # Panics
    ///
    /// Panics if the builder has no loader.
    pub fn register(&self, builder: GroupBuilder) -> Arc<Group> {
        let group = Arc::new(builder.build());
        let old = self.groups.write().insert(group.name().to_string(), group.clone());
        if old.is_some() {
            tracing::warn!("[registry]: group replaced, name: {}", group.name());
        } else {
            tracing::info!(
                "[registry]: group registered, name: {}, capacity: {}",
                group.name(),
                group.capacity()
            );
        }
        group
    }

    /// Find the group registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Count of registered groups.
    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    /// Returns `true` if no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }

    /// Names of the registered groups, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.groups.read().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}
