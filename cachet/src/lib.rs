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

//! cachet is an in-process, byte-bounded LRU cache organized in named groups.
//!
//! Each [`Group`] owns a cache with its own capacity and a [`Loader`] that is consulted on a miss. Values are
//! immutable [`ByteView`]s, so handing them out never exposes the cached bytes to mutation.
//!
//! ```rust
//! use cachet::{Error, Registry};
//!
//! let registry = Registry::new();
//! registry.new_group("scores", 2 << 10, |key: &str| match key {
//!     "Tom" => Ok(b"630".to_vec()),
//!     _ => Err(Error::not_found(key)),
//! });
//!
//! let scores = registry.lookup("scores").unwrap();
//! assert_eq!(scores.get("Tom").unwrap().to_string(), "630");
//! assert!(scores.get("Kate").is_err());
//! ```

mod group;
mod loader;
mod registry;
mod statistics;
mod view;

mod prelude;
pub use prelude::*;
