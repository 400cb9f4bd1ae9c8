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

use cachet_common::error::Result;

/// Loads the value of a key from the source of truth on a cache miss.
///
/// The loader is called without any cache lock held, and may be called concurrently, even for the same key.
///
/// Any `Fn(&str) -> Result<Vec<u8>>` closure is a loader:
///
/// ```rust
/// # use cachet::{Error, Loader};
/// let loader = |key: &str| match key {
///     "Tom" => Ok(b"630".to_vec()),
///     _ => Err(Error::not_found(key)),
/// };
/// assert_eq!(loader.load("Tom").unwrap(), b"630");
/// ```
pub trait Loader: Send + Sync + 'static {
    /// Produce the bytes of the key, or report why it cannot.
    fn load(&self, key: &str) -> Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync + 'static,
{
    fn load(&self, key: &str) -> Result<Vec<u8>> {
        self(key)
    }
}
