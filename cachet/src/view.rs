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

use std::fmt::{Debug, Display};

use bytes::Bytes;
use cachet_common::code::Weight;

/// An immutable view of bytes, the value type of a [`crate::Group`].
///
/// Constructors always copy their input, so the caller's buffer can be reused or mutated afterwards without
/// affecting the cached content. Cloning a view is cheap and shares the same frozen bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    /// Create a view holding a copy of `data`.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(data),
        }
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Returns `true` if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Copy the bytes out.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// The content as text, `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.b).ok()
    }

    /// The byte at `index`, `None` if out of bounds.
    pub fn at(&self, index: usize) -> Option<u8> {
        self.b.get(index).copied()
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        &self.b
    }
}

impl From<&[u8]> for ByteView {
    fn from(data: &[u8]) -> Self {
        Self::copy_from_slice(data)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from_slice(s.as_bytes())
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(data: Vec<u8>) -> Self {
        Self::copy_from_slice(&data)
    }
}

impl Weight for ByteView {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Display for ByteView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.b))
    }
}

impl Debug for ByteView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ByteView").field(&self.b).finish()
    }
}
