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

use std::{collections::HashMap, path::PathBuf};

use bytesize::ByteSize;
use cachet::{ErrorKind, GroupBuilder, GroupConfig, Registry};
use clap::Args;

use crate::error::Result;

const DB: [(&str, &str); 3] = [("Tom", "630"), ("Jack", "589"), ("Sam", "567")];

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Keys to get, in order. Defaults to every record of the demo db plus one missing key.
    keys: Vec<String>,

    /// Name of the group.
    #[arg(short, long, default_value = "scores")]
    name: String,

    /// Cache capacity of the group, counting both keys and values. `0` means unbounded.
    #[arg(short, long, default_value = "2KiB")]
    capacity: ByteSize,

    /// Group config file in JSON. Overrides `name` and `capacity`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rounds of gets over the keys.
    #[arg(short, long, default_value_t = 2)]
    repeat: usize,
}

/// Convert a capacity argument to bytes, failing if it exceeds the address space of the target.
fn capacity_of(size: ByteSize) -> Result<usize> {
    let capacity = usize::try_from(size.as_u64()).map_err(|e| {
        cachet::Error::new(ErrorKind::Config, "capacity does not fit in usize")
            .with_context("capacity", size)
            .with_source(e)
    })?;
    Ok(capacity)
}

pub fn run(args: DemoArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => serde_json::from_str::<GroupConfig>(&std::fs::read_to_string(path)?)?,
        None => GroupConfig {
            name: args.name.clone(),
            capacity: capacity_of(args.capacity)?,
        },
    };

    let db = DB.into_iter().collect::<HashMap<_, _>>();
    let registry = Registry::new();
    let group = registry.register(GroupBuilder::from_config(config)?.with_loader(move |key: &str| {
        tracing::info!("[SlowDB] search key {key}");
        match db.get(key) {
            Some(score) => Ok(score.as_bytes().to_vec()),
            None => Err(cachet::Error::not_found(key)),
        }
    }));

    let keys = if args.keys.is_empty() {
        DB.iter()
            .map(|(key, _)| key.to_string())
            .chain(std::iter::once("Kate".to_string()))
            .collect()
    } else {
        args.keys
    };

    for round in 0..args.repeat {
        println!("round {round}:");
        for key in &keys {
            match group.get(key) {
                Ok(value) => println!("  {key} => {value}"),
                Err(e) => println!("  {key} => {e}"),
            }
        }
    }

    let stats = group.statistics();
    println!(
        "group: {}, entries: {}, usage: {}, hits: {}, misses: {}, loads: {}, load errors: {}",
        group.name(),
        group.cache_len(),
        ByteSize::b(group.cache_usage() as u64),
        stats.hits(),
        stats.misses(),
        stats.loads(),
        stats.load_errors(),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_of() {
        assert_eq!(capacity_of(ByteSize::kib(2)).unwrap(), 2 << 10);
        assert_eq!(capacity_of(ByteSize::b(0)).unwrap(), 0);
        assert_eq!(capacity_of(ByteSize::b(u32::MAX as u64)).unwrap(), u32::MAX as usize);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_capacity_of_max() {
        assert_eq!(capacity_of(ByteSize::b(u64::MAX)).unwrap(), usize::MAX);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_capacity_overflow() {
        use crate::error::Error;

        match capacity_of(ByteSize::b(u64::MAX)) {
            Err(Error::Cache(e)) => {
                assert_eq!(e.kind(), ErrorKind::Config);
                assert!(e.downcast_ref::<std::num::TryFromIntError>().is_some());
            }
            r => panic!("unexpected result: {r:?}"),
        }
    }
}
